use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

mod descriptor;
pub use descriptor::{ArrayDescriptor, DtypeError, TypeMismatch};
mod endian;
pub use endian::{Endian, NPY_DEFAULT_ENDIAN};
mod int;
pub use int::IntSize;
mod float;
pub use float::FloatSize;

pub trait NBytes {
    /// Number of bytes in the data type
    fn nbytes(&self) -> usize;

    /// Number of bits in the data type
    fn nbits(&self) -> usize {
        self.nbytes() * 8
    }

    /// Whether the data type should have an endianness.
    fn has_endianness(&self) -> bool {
        self.nbytes() > 1
    }
}

/// The three families of numbers a descriptor can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericKind {
    Float,
    SignedInteger,
    UnsignedInteger,
}

impl NumericKind {
    /// Kind from the type character of a descriptor (`f`, `i` or `u`).
    pub fn from_type_char(c: char) -> Option<Self> {
        match c {
            'f' => Some(Self::Float),
            'i' => Some(Self::SignedInteger),
            'u' => Some(Self::UnsignedInteger),
            _ => None,
        }
    }

    pub fn type_char(&self) -> char {
        match self {
            Self::Float => 'f',
            Self::SignedInteger => 'i',
            Self::UnsignedInteger => 'u',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int(IntSize),
    UInt(IntSize),
    Float(FloatSize),
}

impl DataType {
    /// Combine a numeric kind with a width in bytes.
    ///
    /// Returns [None] for combinations with no decode strategy,
    /// e.g. single-byte floats.
    pub fn from_kind_nbytes(kind: NumericKind, nbytes: usize) -> Option<Self> {
        match kind {
            NumericKind::Float => FloatSize::from_nbytes(nbytes).map(Self::Float),
            NumericKind::SignedInteger => IntSize::from_nbytes(nbytes).map(Self::Int),
            NumericKind::UnsignedInteger => IntSize::from_nbytes(nbytes).map(Self::UInt),
        }
    }

    pub fn numeric_kind(&self) -> NumericKind {
        match self {
            Self::Int(_) => NumericKind::SignedInteger,
            Self::UInt(_) => NumericKind::UnsignedInteger,
            Self::Float(_) => NumericKind::Float,
        }
    }
}

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

impl NBytes for DataType {
    fn nbytes(&self) -> usize {
        match self {
            Self::Int(s) | Self::UInt(s) => s.nbytes(),
            Self::Float(s) => s.nbytes(),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nbits = self.nbits();
        let s = match self {
            Self::Int(_s) => format!("int{nbits}"),
            Self::UInt(_s) => format!("uint{nbits}"),
            Self::Float(_s) => format!("float{nbits}"),
        };
        write!(f, "{}", s)
    }
}

fn split_str_num(s: &str) -> (&str, Option<usize>) {
    let clos = |c: char| c.is_ascii_digit();
    if let Some(idx) = s.find(clos) {
        (&s[0..idx], s[idx..].parse().ok())
    } else {
        (s, None)
    }
}

impl FromStr for DataType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (s, nbits) = split_str_num(s);
        if let Some(n) = nbits {
            match s {
                "int" => Ok(Self::Int(n.try_into()?)),
                "uint" => Ok(Self::UInt(n.try_into()?)),
                "float" => Ok(Self::Float(n.try_into()?)),
                _ => Err("Unknown data type"),
            }
        } else {
            Err("Could not parse data type")
        }
    }
}

pub(crate) type PrimitiveDecoder<T> = Box<dyn Fn(&[u8]) -> T>;

/// Trait implemented by the primitive types an array can be decoded into.
///
/// Each implementor corresponds to exactly one [DataType];
/// decoding into `T` is only permitted when the file's descriptor
/// resolves to `T::NPY_TYPE`.
///
/// The supertraits are not necessary for decoding, but are used to
/// remove redundant bounds elsewhere when operating generically over
/// element types.
pub trait Element:
    Send
    + Sync
    + Clone
    + Copy
    + Default
    + 'static
    + Sized
    + Serialize
    + PartialEq
    + Debug
{
    const NPY_TYPE: DataType;

    /// Produce a routine which reads a self-typed value from
    /// a buffer of exactly `NPY_TYPE.nbytes()` bytes.
    fn decoder(endian: Endian) -> PrimitiveDecoder<Self>;
}

macro_rules! npy_primitive {
    ($d_name:expr, $d_type:ty, $bo_read_fn:ident) => {
        impl Element for $d_type {
            const NPY_TYPE: DataType = $d_name;

            fn decoder(endian: Endian) -> PrimitiveDecoder<Self> {
                use byteorder::ByteOrder;
                Box::new(match endian {
                    Endian::Big => |buf: &[u8]| byteorder::BigEndian::$bo_read_fn(buf),
                    Endian::Little => |buf: &[u8]| byteorder::LittleEndian::$bo_read_fn(buf),
                })
            }
        }
    };
}

npy_primitive!(DataType::Float(FloatSize::b32), f32, read_f32);
npy_primitive!(DataType::Float(FloatSize::b64), f64, read_f64);
npy_primitive!(DataType::UInt(IntSize::b16), u16, read_u16);
npy_primitive!(DataType::UInt(IntSize::b32), u32, read_u32);
npy_primitive!(DataType::UInt(IntSize::b64), u64, read_u64);
npy_primitive!(DataType::Int(IntSize::b16), i16, read_i16);
npy_primitive!(DataType::Int(IntSize::b32), i32, read_i32);
npy_primitive!(DataType::Int(IntSize::b64), i64, read_i64);

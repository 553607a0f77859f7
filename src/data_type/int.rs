use serde::{Deserialize, Serialize};

use super::{DataType, Element, NBytes, PrimitiveDecoder};
use crate::data_type::Endian;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum IntSize {
    b8,
    b16,
    b32,
    b64,
}

impl IntSize {
    /// Integer size from a width in bytes, as written in dtype descriptors.
    pub fn from_nbytes(nbytes: usize) -> Option<Self> {
        match nbytes {
            1 => Some(Self::b8),
            2 => Some(Self::b16),
            4 => Some(Self::b32),
            8 => Some(Self::b64),
            _ => None,
        }
    }
}

impl TryFrom<usize> for IntSize {
    type Error = &'static str;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(Self::b8),
            16 => Ok(Self::b16),
            32 => Ok(Self::b32),
            64 => Ok(Self::b64),
            _ => Err("not a valid integer size"),
        }
    }
}

impl NBytes for IntSize {
    fn nbytes(&self) -> usize {
        match self {
            Self::b8 => 1,
            Self::b16 => 2,
            Self::b32 => 4,
            Self::b64 => 8,
        }
    }
}

// byteorder has no ByteOrder::read_u8, so single-byte types are done by hand.
impl Element for u8 {
    const NPY_TYPE: DataType = DataType::UInt(IntSize::b8);

    fn decoder(_endian: Endian) -> PrimitiveDecoder<Self> {
        Box::new(|buf: &[u8]| buf[0])
    }
}

impl Element for i8 {
    const NPY_TYPE: DataType = DataType::Int(IntSize::b8);

    fn decoder(_endian: Endian) -> PrimitiveDecoder<Self> {
        Box::new(|buf: &[u8]| Self::from_le_bytes([buf[0]]))
    }
}

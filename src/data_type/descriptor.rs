use std::{fmt::Display, str::FromStr};

use serde::Serialize;
use thiserror::Error;

use super::{DataType, Element, Endian, NBytes, NumericKind, PrimitiveDecoder};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DtypeError {
    #[error("Empty dtype descriptor")]
    Empty,
    #[error("Unrecognized data type in descriptor {descr:?}")]
    UnknownKind { descr: String },
    #[error("Unrecognized size {size:?} in descriptor {descr:?}")]
    UnknownSize { descr: String, size: char },
    #[error("Unsupported size: {nbytes}-byte {kind:?}")]
    UnsupportedWidth { kind: NumericKind, nbytes: usize },
}

/// Requested element type does not match the type described by the header.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Requested element type {requested} but array contains {found}")]
pub struct TypeMismatch {
    pub requested: DataType,
    pub found: DataType,
}

/// Concrete decode strategy for the elements of an array:
/// numeric kind and width (via [DataType]) plus byte order.
///
/// Parsed from a descriptor string such as `<i4` or `>f8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrayDescriptor {
    data_type: DataType,
    endian: Endian,
}

impl ArrayDescriptor {
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn numeric_kind(&self) -> NumericKind {
        self.data_type.numeric_kind()
    }

    /// Width of a single element in bytes.
    pub fn byte_width(&self) -> usize {
        self.data_type.nbytes()
    }

    pub fn is_big_endian(&self) -> bool {
        self.endian == Endian::Big
    }

    /// Check that `T` is exactly the described type and, if so,
    /// produce the routine which decodes one `T` from `byte_width()` bytes.
    pub(crate) fn decoder<T: Element>(&self) -> Result<PrimitiveDecoder<T>, TypeMismatch> {
        if T::NPY_TYPE != self.data_type {
            return Err(TypeMismatch {
                requested: T::NPY_TYPE,
                found: self.data_type,
            });
        }
        Ok(T::decoder(self.endian))
    }
}

impl FromStr for ArrayDescriptor {
    type Err = DtypeError;

    /// Resolve `[byte-order marker]? (f|i|u) ... [1|2|4|8]`.
    ///
    /// Only the final character is read as the width,
    /// so anything between the type character and it is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().peekable();
        let first = *chars.peek().ok_or(DtypeError::Empty)?;
        let endian = match Endian::from_marker(first) {
            Some(e) => {
                chars.next();
                e
            }
            None => Default::default(),
        };

        let kind = chars
            .next()
            .and_then(NumericKind::from_type_char)
            .ok_or_else(|| DtypeError::UnknownKind {
                descr: s.to_owned(),
            })?;

        // non-empty, checked above
        let size = s.chars().last().unwrap_or_default();
        let nbytes = match size {
            '1' | '2' | '4' | '8' => size as usize - '0' as usize,
            _ => {
                return Err(DtypeError::UnknownSize {
                    descr: s.to_owned(),
                    size,
                })
            }
        };

        let data_type = DataType::from_kind_nbytes(kind, nbytes)
            .ok_or(DtypeError::UnsupportedWidth { kind, nbytes })?;
        Ok(Self { data_type, endian })
    }
}

impl Display for ArrayDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if !self.data_type.has_endianness() {
            '|'
        } else {
            match self.endian {
                Endian::Big => '>',
                Endian::Little => '<',
            }
        };
        write!(
            f,
            "{}{}{}",
            marker,
            self.numeric_kind().type_char(),
            self.byte_width()
        )
    }
}

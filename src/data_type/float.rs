use serde::{Deserialize, Serialize};

use super::NBytes;

/// IEEE-754 float widths.
///
/// Half precision (`f2`) is not supported.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum FloatSize {
    b32,
    b64,
}

impl FloatSize {
    /// Float size from a width in bytes, as written in dtype descriptors.
    pub fn from_nbytes(nbytes: usize) -> Option<Self> {
        match nbytes {
            4 => Some(Self::b32),
            8 => Some(Self::b64),
            _ => None,
        }
    }
}

impl TryFrom<usize> for FloatSize {
    type Error = &'static str;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            32 => Ok(Self::b32),
            64 => Ok(Self::b64),
            _ => Err("not a valid float size"),
        }
    }
}

impl NBytes for FloatSize {
    fn nbytes(&self) -> usize {
        match self {
            Self::b32 => 4,
            Self::b64 => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_single_and_double() {
        assert_eq!(FloatSize::from_nbytes(4), Some(FloatSize::b32));
        assert_eq!(FloatSize::from_nbytes(8), Some(FloatSize::b64));
        for n in [1, 2, 16] {
            assert_eq!(FloatSize::from_nbytes(n), None);
        }
        assert_eq!(FloatSize::b64.nbits(), 64);
    }
}

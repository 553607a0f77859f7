use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;

use crate::{header::HeaderError, CoordVec, Ndim};

/// Layout information for a decoded array.
///
/// Every dimension is strictly positive.
/// An empty shape describes a scalar, which holds a single element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayMetadata {
    fortran_order: bool,
    shape: CoordVec<u64>,
    #[serde(skip)]
    numel: usize,
}

impl ArrayMetadata {
    pub fn new(shape: CoordVec<u64>, fortran_order: bool) -> Result<Self, HeaderError> {
        if let Some(d) = shape.iter().find(|d| **d == 0) {
            return Err(HeaderError::InvalidDimension(*d as i64));
        }
        let numel = shape
            .iter()
            .try_fold(1usize, |acc, d| {
                usize::try_from(*d).ok().and_then(|d| acc.checked_mul(d))
            })
            .ok_or_else(|| HeaderError::TooManyElements(shape.to_vec()))?;
        Ok(Self {
            fortran_order,
            shape,
            numel,
        })
    }

    /// Whether the payload is laid out column-major.
    ///
    /// This is recorded only; decoded data is never reordered.
    pub fn fortran_order(&self) -> bool {
        self.fortran_order
    }

    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Total number of elements, i.e. the product of the shape.
    pub fn numel(&self) -> usize {
        self.numel
    }
}

impl Ndim for ArrayMetadata {
    fn ndim(&self) -> usize {
        self.shape.len()
    }
}

/// Formats the shape as a Python tuple, e.g. `(3,)` or `(2, 4)`.
impl Display for ArrayMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.shape.as_slice() {
            [d] => write!(f, "({d},)"),
            s => write!(f, "({})", s.iter().join(", ")),
        }
    }
}

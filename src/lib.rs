use ndarray::{ArcArray, IxDyn};
use smallvec::SmallVec;

mod array;
pub mod data_type;
mod error;
#[cfg(feature = "filesystem")]
pub mod fs;
pub mod header;
mod metadata;
pub mod preamble;
pub mod prelude;
mod reader;
#[cfg(test)]
mod test_util;
mod util;

pub use array::{DecodedArray, DynArray};
pub use data_type::{ArrayDescriptor, DataType, Element, Endian, NumericKind};
pub use error::ReadNpyError;
pub use metadata::ArrayMetadata;
pub use reader::{parse, parse_dyn, read_header, Header};

const COORD_SMALLVEC_SIZE: usize = 6;

pub type CoordVec<T> = SmallVec<[T; COORD_SMALLVEC_SIZE]>;
pub type ArcArrayD<T> = ArcArray<T, IxDyn>;

pub trait Ndim {
    fn ndim(&self) -> usize;
}

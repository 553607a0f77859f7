pub use crate::data_type::{ArrayDescriptor, DataType, Element, Endian, NBytes, NumericKind};
#[cfg(feature = "filesystem")]
pub use crate::fs::{read_npy_file, read_npy_file_dyn};
pub use crate::{
    parse, parse_dyn, read_header, ArrayMetadata, DecodedArray, DynArray, Header, Ndim,
    ReadNpyError,
};

pub use ndarray;
pub use serde_json;
pub use smallvec;

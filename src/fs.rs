//! Path-based convenience wrappers around [crate::parse] and [crate::parse_dyn].
use std::{fs::File, io::BufReader, path::Path};

use log::debug;

use crate::{parse, parse_dyn, DecodedArray, DynArray, Element, ReadNpyError};

fn open<P: AsRef<Path>>(path: P) -> Result<BufReader<File>, ReadNpyError> {
    let path = path.as_ref();
    debug!("Opening {}", path.display());
    Ok(BufReader::new(File::open(path)?))
}

/// Read a `.npy` file as an array of `T`.
///
/// The file is closed before returning, whether or not decoding succeeded.
pub fn read_npy_file<T: Element, P: AsRef<Path>>(path: P) -> Result<DecodedArray<T>, ReadNpyError> {
    parse(open(path)?)
}

/// Read a `.npy` file using the element type it declares.
pub fn read_npy_file_dyn<P: AsRef<Path>>(path: P) -> Result<DynArray, ReadNpyError> {
    parse_dyn(open(path)?)
}

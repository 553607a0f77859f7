use std::io;

use thiserror::Error;

use crate::{
    data_type::{DtypeError, TypeMismatch},
    header::HeaderError,
    preamble::Version,
};

fn fmt_version(version: &Option<Version>) -> String {
    match version {
        Some(v) => v.to_string(),
        None => "missing version bytes".to_owned(),
    }
}

/// Any reason a parse call produced no array.
#[derive(Error, Debug)]
pub enum ReadNpyError {
    #[error("Incorrect file format. Expected correct magic string, got {found:02x?}")]
    Format { found: Vec<u8> },
    #[error("Unsupported version: {}", fmt_version(.0))]
    UnsupportedVersion(Option<Version>),
    #[error("Truncated input: {field} needs {expected} bytes but only {found} were available")]
    Truncated {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Malformed header: {0}")]
    MalformedHeader(#[from] HeaderError),
    #[error("Unsupported dtype: {0}")]
    UnsupportedDtype(#[from] DtypeError),
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

use std::io::Read;

use log::debug;
use serde::Serialize;

use crate::{
    array::{DecodedArray, DynArray},
    data_type::{ArrayDescriptor, DataType, Element},
    header::HeaderFields,
    preamble::{read_header_block, read_preamble, Version},
    ArrayMetadata, ReadNpyError,
};

/// Everything known about an array before its payload is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    version: Version,
    descriptor: ArrayDescriptor,
    metadata: ArrayMetadata,
}

impl Header {
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn descriptor(&self) -> &ArrayDescriptor {
        &self.descriptor
    }

    pub fn metadata(&self) -> &ArrayMetadata {
        &self.metadata
    }

    /// Decode the payload which follows this header in `r` as `T`.
    ///
    /// Fails with [ReadNpyError::TypeMismatch] before reading
    /// if `T` is not exactly the type in the descriptor.
    pub fn read_data<T: Element, R: Read>(self, mut r: R) -> Result<DecodedArray<T>, ReadNpyError> {
        DecodedArray::read_from(&mut r, &self.descriptor, self.metadata)
    }

    /// As [Header::read_data], with the element type given at runtime.
    pub fn read_data_as<R: Read>(
        self,
        mut r: R,
        data_type: DataType,
    ) -> Result<DynArray, ReadNpyError> {
        DynArray::read_from(&mut r, &self.descriptor, self.metadata, data_type)
    }

    /// Decode the payload as whatever type the descriptor names.
    pub fn read_data_dyn<R: Read>(self, r: R) -> Result<DynArray, ReadNpyError> {
        let data_type = self.descriptor.data_type();
        self.read_data_as(r, data_type)
    }
}

/// Validate the preamble and resolve the header, leaving `r` at the start of the payload.
pub fn read_header<R: Read>(mut r: R) -> Result<Header, ReadNpyError> {
    let version = read_preamble(&mut r)?;
    debug!("Validated preamble for format version {version}");

    let block = read_header_block(&mut r)?;
    let fields = HeaderFields::extract(&block)?;
    let metadata = ArrayMetadata::new(fields.shape, fields.fortran_order)?;

    let descriptor: ArrayDescriptor = fields.descr.parse()?;
    debug!("Resolved dtype {:?} to {}", fields.descr, descriptor.data_type());

    Ok(Header {
        version,
        descriptor,
        metadata,
    })
}

/// Decode a complete array of `T` from `r`.
///
/// `r` is read sequentially and never past the end of the payload.
/// Nothing is returned unless every element was decoded.
pub fn parse<T: Element, R: Read>(mut r: R) -> Result<DecodedArray<T>, ReadNpyError> {
    read_header(&mut r)?.read_data(&mut r)
}

/// Decode a complete array from `r` using the element type it declares.
pub fn parse_dyn<R: Read>(mut r: R) -> Result<DynArray, ReadNpyError> {
    read_header(&mut r)?.read_data_dyn(&mut r)
}

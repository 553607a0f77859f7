use std::io::Read;

use log::debug;
use ndarray::{ErrorKind, IxDyn, ShapeBuilder, ShapeError};
use serde::Serialize;

use crate::{
    data_type::{ArrayDescriptor, DataType, Element, FloatSize, IntSize, NBytes},
    util::read_full,
    variant_from_data, ArcArrayD, ArrayMetadata, CoordVec, Ndim, ReadNpyError,
};

// The element count comes from the header; don't reserve more than this up front.
const MAX_PREALLOC: usize = 1 << 20;

/// A fully decoded array: its metadata and `numel()` elements in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedArray<T: Element> {
    metadata: ArrayMetadata,
    data: Vec<T>,
}

impl<T: Element> DecodedArray<T> {
    /// Decode `metadata.numel()` elements from `r`.
    ///
    /// Fails before reading anything if `T` is not the described type.
    /// Any short read discards what was decoded so far.
    pub(crate) fn read_from<R: Read>(
        r: &mut R,
        descriptor: &ArrayDescriptor,
        metadata: ArrayMetadata,
    ) -> Result<Self, ReadNpyError> {
        let decoder = descriptor.decoder::<T>()?;
        let nbytes = descriptor.byte_width();
        let numel = metadata.numel();
        debug!("Decoding {numel} elements of {descriptor}");

        let mut buf = vec![0u8; nbytes];
        let mut data = Vec::with_capacity(numel.min(MAX_PREALLOC));
        for idx in 0..numel {
            let n = read_full(r, buf.as_mut_slice())?;
            if n < nbytes {
                return Err(ReadNpyError::Truncated {
                    field: "data",
                    expected: numel.saturating_mul(nbytes),
                    found: idx * nbytes + n,
                });
            }
            data.push(decoder(buf.as_slice()));
        }
        Ok(Self { metadata, data })
    }

    pub fn metadata(&self) -> &ArrayMetadata {
        &self.metadata
    }

    pub fn shape(&self) -> &[u64] {
        self.metadata.shape()
    }

    pub fn fortran_order(&self) -> bool {
        self.metadata.fortran_order()
    }

    /// Elements in the order they were stored.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn into_parts(self) -> (ArrayMetadata, Vec<T>) {
        (self.metadata, self.data)
    }

    /// Wrap the data in an n-dimensional array.
    ///
    /// The flat data is interpreted as column-major if `fortran_order` is set,
    /// so indexing the result gives the same element as indexing the array numpy saved.
    pub fn into_ndarray(self) -> Result<ArcArrayD<T>, ShapeError> {
        let shape = self
            .metadata
            .shape()
            .iter()
            .map(|s| usize::try_from(*s))
            .collect::<Result<CoordVec<usize>, _>>()
            .map_err(|_| ShapeError::from_kind(ErrorKind::Overflow))?;
        let shape = IxDyn(shape.as_slice()).set_f(self.metadata.fortran_order());
        ArcArrayD::from_shape_vec(shape, self.data)
    }
}

impl<T: Element> Ndim for DecodedArray<T> {
    fn ndim(&self) -> usize {
        self.metadata.ndim()
    }
}

/// A decoded array whose element type was chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum DynArray {
    I8(DecodedArray<i8>),
    I16(DecodedArray<i16>),
    I32(DecodedArray<i32>),
    I64(DecodedArray<i64>),
    U8(DecodedArray<u8>),
    U16(DecodedArray<u16>),
    U32(DecodedArray<u32>),
    U64(DecodedArray<u64>),
    F32(DecodedArray<f32>),
    F64(DecodedArray<f64>),
}

variant_from_data!(DynArray, I8, DecodedArray<i8>);
variant_from_data!(DynArray, I16, DecodedArray<i16>);
variant_from_data!(DynArray, I32, DecodedArray<i32>);
variant_from_data!(DynArray, I64, DecodedArray<i64>);
variant_from_data!(DynArray, U8, DecodedArray<u8>);
variant_from_data!(DynArray, U16, DecodedArray<u16>);
variant_from_data!(DynArray, U32, DecodedArray<u32>);
variant_from_data!(DynArray, U64, DecodedArray<u64>);
variant_from_data!(DynArray, F32, DecodedArray<f32>);
variant_from_data!(DynArray, F64, DecodedArray<f64>);

macro_rules! dyn_dispatch {
    ($self:expr, $arr:ident => $body:expr) => {
        match $self {
            DynArray::I8($arr) => $body,
            DynArray::I16($arr) => $body,
            DynArray::I32($arr) => $body,
            DynArray::I64($arr) => $body,
            DynArray::U8($arr) => $body,
            DynArray::U16($arr) => $body,
            DynArray::U32($arr) => $body,
            DynArray::U64($arr) => $body,
            DynArray::F32($arr) => $body,
            DynArray::F64($arr) => $body,
        }
    };
}

impl DynArray {
    /// Decode into the element type corresponding to `data_type`.
    ///
    /// `data_type` must still match the descriptor exactly.
    pub(crate) fn read_from<R: Read>(
        r: &mut R,
        descriptor: &ArrayDescriptor,
        metadata: ArrayMetadata,
        data_type: DataType,
    ) -> Result<Self, ReadNpyError> {
        use DataType::*;

        fn read<T: Element, R: Read>(
            r: &mut R,
            descriptor: &ArrayDescriptor,
            metadata: ArrayMetadata,
        ) -> Result<DynArray, ReadNpyError>
        where
            DynArray: From<DecodedArray<T>>,
        {
            DecodedArray::<T>::read_from(r, descriptor, metadata).map(DynArray::from)
        }

        match data_type {
            Int(IntSize::b8) => read::<i8, _>(r, descriptor, metadata),
            Int(IntSize::b16) => read::<i16, _>(r, descriptor, metadata),
            Int(IntSize::b32) => read::<i32, _>(r, descriptor, metadata),
            Int(IntSize::b64) => read::<i64, _>(r, descriptor, metadata),
            UInt(IntSize::b8) => read::<u8, _>(r, descriptor, metadata),
            UInt(IntSize::b16) => read::<u16, _>(r, descriptor, metadata),
            UInt(IntSize::b32) => read::<u32, _>(r, descriptor, metadata),
            UInt(IntSize::b64) => read::<u64, _>(r, descriptor, metadata),
            Float(FloatSize::b32) => read::<f32, _>(r, descriptor, metadata),
            Float(FloatSize::b64) => read::<f64, _>(r, descriptor, metadata),
        }
    }

    pub fn data_type(&self) -> DataType {
        fn of<T: Element>(_arr: &DecodedArray<T>) -> DataType {
            T::NPY_TYPE
        }
        dyn_dispatch!(self, arr => of(arr))
    }

    pub fn metadata(&self) -> &ArrayMetadata {
        dyn_dispatch!(self, arr => arr.metadata())
    }

    pub fn shape(&self) -> &[u64] {
        self.metadata().shape()
    }

    pub fn len(&self) -> usize {
        dyn_dispatch!(self, arr => arr.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total size of the decoded data in bytes.
    pub fn nbytes(&self) -> usize {
        self.len() * self.data_type().nbytes()
    }
}

impl Ndim for DynArray {
    fn ndim(&self) -> usize {
        self.metadata().ndim()
    }
}

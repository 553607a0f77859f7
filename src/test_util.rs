//! Builders for in-memory `.npy` fixtures.
use crate::{preamble::MAGIC, Endian};

pub(crate) trait TestEncode: Copy {
    fn encode(&self, endian: Endian) -> Vec<u8>;
}

macro_rules! test_encode {
    ($($t:ty),*) => {
        $(
            impl TestEncode for $t {
                fn encode(&self, endian: Endian) -> Vec<u8> {
                    match endian {
                        Endian::Big => self.to_be_bytes().to_vec(),
                        Endian::Little => self.to_le_bytes().to_vec(),
                    }
                }
            }
        )*
    };
}

test_encode!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

pub(crate) fn encode_all<T: TestEncode>(values: &[T], endian: Endian) -> Vec<u8> {
    values.iter().flat_map(|v| v.encode(endian)).collect()
}

/// Header dict as numpy writes it, padded with spaces and a newline
/// so that the payload starts on a 64-byte boundary.
pub(crate) fn numpy_header(descr: &str, fortran_order: bool, shape: &[u64]) -> String {
    let order = if fortran_order { "True" } else { "False" };
    let shape = match shape {
        [d] => format!("({d},)"),
        s => format!(
            "({})",
            s.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
        ),
    };
    let mut header =
        format!("{{'descr': '{descr}', 'fortran_order': {order}, 'shape': {shape}, }}");
    let unpadded = MAGIC.len() + 4 + header.len() + 1;
    let padding = (64 - unpadded % 64) % 64;
    header.extend(std::iter::repeat(' ').take(padding));
    header.push('\n');
    header
}

/// Version 1.0 preamble, header length, header and payload.
pub(crate) fn npy_bytes(header: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = MAGIC.to_vec();
    out.extend([1, 0]);
    out.extend((header.len() as u16).to_le_bytes());
    out.extend(header);
    out.extend(payload);
    out
}

pub(crate) fn npy_file(descr: &str, fortran_order: bool, shape: &[u64], payload: &[u8]) -> Vec<u8> {
    npy_bytes(
        numpy_header(descr, fortran_order, shape).as_bytes(),
        payload,
    )
}

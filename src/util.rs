use std::io::{self, ErrorKind, Read};

use crate::ReadNpyError;

/// adds `From<D>` for an enum with a variant containing D
#[macro_export]
macro_rules! variant_from_data {
    ($enum:ty, $variant:ident, $data_type:ty) => {
        impl std::convert::From<$data_type> for $enum {
            fn from(c: $data_type) -> Self {
                <$enum>::$variant(c)
            }
        }
    };
}

/// Like [Read::read_exact], but reports how many bytes were read
/// rather than failing when the reader runs out.
pub(crate) fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut n_read = 0;
    while n_read < buf.len() {
        match r.read(&mut buf[n_read..]) {
            Ok(0) => break,
            Ok(n) => n_read += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(n_read)
}

/// Fill `buf` completely, or fail with [ReadNpyError::Truncated] naming `field`.
pub(crate) fn read_field<R: Read>(
    r: &mut R,
    buf: &mut [u8],
    field: &'static str,
) -> Result<(), ReadNpyError> {
    let found = read_full(r, buf)?;
    if found < buf.len() {
        return Err(ReadNpyError::Truncated {
            field,
            expected: buf.len(),
            found,
        });
    }
    Ok(())
}

//! Extraction of the three required fields from the header block.
//!
//! The header is a Python dict literal, e.g.
//! `{'descr': '<i4', 'fortran_order': False, 'shape': (3,), }`,
//! but it is not parsed as one: each key is located by substring search
//! (first occurrence wins) and only the bytes after it are inspected.
use std::num::ParseIntError;

use log::trace;
use thiserror::Error;

use crate::CoordVec;

const DESCR_KEY: &[u8] = b"'descr':";
const FORTRAN_ORDER_KEY: &[u8] = b"'fortran_order':";
const SHAPE_KEY: &[u8] = b"shape";

const TRUE_LITERAL: &[u8] = b"True";
const FALSE_LITERAL: &[u8] = b"False";

/// Number of bytes shown when a `fortran_order` value is not recognized.
const DIAGNOSTIC_LEN: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("{0} key not found")]
    MissingKey(&'static str),
    #[error("Malformed {0} entry: unterminated value")]
    Unterminated(&'static str),
    #[error("Malformed fortran_order entry in header, starting {0:?}")]
    FortranOrder(String),
    #[error("Could not parse dimension {piece:?}: {source}")]
    ParseDimension {
        piece: String,
        source: ParseIntError,
    },
    #[error("Invalid dimension size {0}")]
    InvalidDimension(i64),
    #[error("Number of elements in shape {0:?} overflows")]
    TooManyElements(Vec<u64>),
}

/// Raw field values scanned from a header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    pub descr: String,
    pub fortran_order: bool,
    pub shape: CoordVec<u64>,
}

impl HeaderFields {
    pub fn extract(header: &[u8]) -> Result<Self, HeaderError> {
        let descr = extract_descr(header)?;
        let fortran_order = extract_fortran_order(header)?;
        let shape = extract_shape(header)?;
        trace!("Header fields: descr={descr:?}, fortran_order={fortran_order}, shape={shape:?}");
        Ok(Self {
            descr,
            fortran_order,
            shape,
        })
    }
}

/// Index just past the first occurrence of `needle`.
fn find_end_of(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|idx| idx + needle.len())
}

/// Starting at `from`, find the first `open` and then the first `close` after it.
///
/// Returns the exclusive bounds of the bytes between them.
fn find_bounded(haystack: &[u8], from: usize, open: u8, close: u8) -> Option<(usize, usize)> {
    let start = from + haystack.get(from..)?.iter().position(|b| *b == open)? + 1;
    let end = start + haystack[start..].iter().position(|b| *b == close)?;
    Some((start, end))
}

fn extract_descr(header: &[u8]) -> Result<String, HeaderError> {
    let offset = find_end_of(header, DESCR_KEY).ok_or(HeaderError::MissingKey("descr"))?;
    let (start, end) =
        find_bounded(header, offset, b'\'', b'\'').ok_or(HeaderError::Unterminated("descr"))?;
    Ok(String::from_utf8_lossy(&header[start..end]).into_owned())
}

fn extract_fortran_order(header: &[u8]) -> Result<bool, HeaderError> {
    let offset = find_end_of(header, FORTRAN_ORDER_KEY)
        .ok_or(HeaderError::MissingKey("fortran_order"))?;
    let rest = &header[offset..];
    let value = match rest.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(idx) => &rest[idx..],
        None => &[],
    };

    if value.starts_with(FALSE_LITERAL) {
        Ok(false)
    } else if value.starts_with(TRUE_LITERAL) {
        Ok(true)
    } else {
        let shown = &value[..value.len().min(DIAGNOSTIC_LEN)];
        Err(HeaderError::FortranOrder(
            String::from_utf8_lossy(shown).into_owned(),
        ))
    }
}

fn extract_shape(header: &[u8]) -> Result<CoordVec<u64>, HeaderError> {
    let offset = find_end_of(header, SHAPE_KEY).ok_or(HeaderError::MissingKey("shape"))?;
    let (start, end) =
        find_bounded(header, offset, b'(', b')').ok_or(HeaderError::Unterminated("shape"))?;
    let dims = String::from_utf8_lossy(&header[start..end]);

    dims.split(',')
        .map(str::trim)
        // `(3,)` leaves an empty trailing piece
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let val: i64 = piece
                .parse()
                .map_err(|source| HeaderError::ParseDimension {
                    piece: piece.to_owned(),
                    source,
                })?;
            if val <= 0 {
                return Err(HeaderError::InvalidDimension(val));
            }
            Ok(val as u64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    const NUMPY_HEADER: &[u8] =
        b"{'descr': '<i4', 'fortran_order': False, 'shape': (3,), }                    \n";

    #[test]
    fn extract_numpy_header() {
        let fields = HeaderFields::extract(NUMPY_HEADER).unwrap();
        let expected: CoordVec<u64> = smallvec![3];
        assert_eq!(fields.descr, "<i4");
        assert!(!fields.fortran_order);
        assert_eq!(fields.shape, expected);
    }

    #[test]
    fn key_order_is_irrelevant() {
        let header = b"{'shape': (2, 5), 'fortran_order': True, 'descr': '>f8'}";
        let fields = HeaderFields::extract(header).unwrap();
        assert_eq!(fields.descr, ">f8");
        assert!(fields.fortran_order);
        assert_eq!(fields.shape.as_slice(), &[2, 5]);
    }

    #[test]
    fn first_occurrence_wins() {
        let header = b"{'descr': '<u2', 'descr': '<f8'}";
        assert_eq!(extract_descr(header).unwrap(), "<u2");
        let header = b"{'shape': (4,), 'shape': (1, 2)}";
        assert_eq!(extract_shape(header).unwrap().as_slice(), &[4]);
    }

    #[test]
    fn missing_keys() {
        assert_eq!(
            extract_descr(b"{'fortran_order': False, 'shape': (3,)}"),
            Err(HeaderError::MissingKey("descr"))
        );
        // the colon is part of the key
        assert_eq!(
            extract_descr(b"{'descr' : '<i4'}"),
            Err(HeaderError::MissingKey("descr"))
        );
        assert_eq!(
            extract_fortran_order(b"{'descr': '<i4'}"),
            Err(HeaderError::MissingKey("fortran_order"))
        );
        assert_eq!(
            extract_shape(b"{'descr': '<i4'}"),
            Err(HeaderError::MissingKey("shape"))
        );
    }

    #[test]
    fn unterminated_descr() {
        assert_eq!(
            extract_descr(b"{'descr': '<i4"),
            Err(HeaderError::Unterminated("descr"))
        );
        assert_eq!(
            extract_descr(b"{'descr': <i4"),
            Err(HeaderError::Unterminated("descr"))
        );
        assert_eq!(
            extract_descr(b"{'descr':"),
            Err(HeaderError::Unterminated("descr"))
        );
    }

    #[test]
    fn descr_may_be_empty() {
        assert_eq!(extract_descr(b"{'descr': ''}").unwrap(), "");
    }

    #[test]
    fn fortran_order_whitespace() {
        assert!(extract_fortran_order(b"'fortran_order':True").unwrap());
        assert!(!extract_fortran_order(b"'fortran_order':   \tFalse}").unwrap());
        assert!(extract_fortran_order(b"'fortran_order': True").unwrap());
    }

    #[test]
    fn fortran_order_is_case_sensitive() {
        let headers: [&[u8]; 4] = [
            b"'fortran_order': true, ",
            b"'fortran_order': FALSE, ",
            b"'fortran_order': 0, ",
            b"'fortran_order': Fals",
        ];
        for header in headers {
            match extract_fortran_order(header) {
                Err(HeaderError::FortranOrder(_)) => (),
                other => panic!("Expected malformed fortran_order, got {other:?}"),
            }
        }
    }

    #[test]
    fn fortran_order_diagnostic() {
        assert_eq!(
            extract_fortran_order(b"'fortran_order': nope, 'shape': ()"),
            Err(HeaderError::FortranOrder("nope,".to_owned()))
        );
        assert_eq!(
            extract_fortran_order(b"'fortran_order':   "),
            Err(HeaderError::FortranOrder(String::new()))
        );
    }

    #[test]
    fn fortran_order_message_shows_prefix() {
        let err = extract_fortran_order(b"'fortran_order': Maybe}").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Malformed fortran_order entry in header, starting "Maybe""#
        );
        let err = extract_fortran_order(b"'fortran_order': X").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Malformed fortran_order entry in header, starting "X""#
        );
    }

    #[test]
    fn shapes() {
        let cases: &[(&[u8], &[u64])] = &[
            (b"'shape': (3,)", &[3]),
            (b"'shape': (3)", &[3]),
            (b"'shape': (2, 3, 4)", &[2, 3, 4]),
            (b"'shape': ( 2 ,3 , )", &[2, 3]),
            (b"'shape': (3, )", &[3]),
            (b"'shape': ()", &[]),
            (b"'shape': (,)", &[]),
            (b"shape=(7,)", &[7]),
        ];
        for (header, expected) in cases {
            let shape = extract_shape(header)
                .unwrap_or_else(|e| panic!("Couldn't parse {:?}: {e}", header));
            assert_eq!(shape.as_slice(), *expected);
        }
    }

    #[test]
    fn reject_non_positive_dimensions() {
        assert_eq!(
            extract_shape(b"'shape': (0,)"),
            Err(HeaderError::InvalidDimension(0))
        );
        assert_eq!(
            extract_shape(b"'shape': (3, -2)"),
            Err(HeaderError::InvalidDimension(-2))
        );
    }

    #[test]
    fn reject_non_numeric_dimensions() {
        let headers: [&[u8]; 4] = [
            b"'shape': (3, x)",
            b"'shape': (3.0,)",
            b"'shape': (3L,)",
            b"'shape': (1 2,)",
        ];
        for header in headers {
            match extract_shape(header) {
                Err(HeaderError::ParseDimension { .. }) => (),
                other => panic!("Expected parse error, got {other:?}"),
            }
        }
    }

    #[test]
    fn unterminated_shape() {
        assert_eq!(
            extract_shape(b"'shape': [3]"),
            Err(HeaderError::Unterminated("shape"))
        );
        assert_eq!(
            extract_shape(b"'shape': (3,"),
            Err(HeaderError::Unterminated("shape"))
        );
    }

    #[test]
    fn bounded_skips_leading_close() {
        assert_eq!(find_bounded(b") (ab)", 0, b'(', b')'), Some((3, 5)));
        assert_eq!(find_bounded(b"abc", 3, b'(', b')'), None);
        assert_eq!(find_bounded(b"abc", 10, b'(', b')'), None);
    }
}

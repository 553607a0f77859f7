use std::{fmt::Display, io::Read};

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};
use serde::Serialize;

use crate::{
    util::{read_field, read_full},
    ReadNpyError,
};

pub const MAGIC: &[u8; 6] = b"\x93NUMPY";
pub const SUPPORTED_MAJOR_VERSION: u8 = 1;

/// Format version from bytes 6 and 7 of the preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Check the magic string and version, consuming exactly 8 bytes.
///
/// A short or mismatched magic string is a [ReadNpyError::Format];
/// a short read of the version or any major version other than 1
/// is a [ReadNpyError::UnsupportedVersion].
pub fn read_preamble<R: Read>(r: &mut R) -> Result<Version, ReadNpyError> {
    let mut magic = [0u8; MAGIC.len()];
    let n = read_full(r, &mut magic)?;
    if n < magic.len() || &magic != MAGIC {
        return Err(ReadNpyError::Format {
            found: magic[..n].to_vec(),
        });
    }

    let mut version = [0u8; 2];
    if read_full(r, &mut version)? < version.len() {
        return Err(ReadNpyError::UnsupportedVersion(None));
    }
    let version = Version {
        major: version[0],
        minor: version[1],
    };
    if version.major != SUPPORTED_MAJOR_VERSION {
        return Err(ReadNpyError::UnsupportedVersion(Some(version)));
    }
    if version.minor != 0 {
        warn!("Unexpected minor version {version}; reading as 1.0");
    }
    Ok(version)
}

/// Read the little-endian `u16` header length and then that many header bytes.
pub fn read_header_block<R: Read>(r: &mut R) -> Result<Vec<u8>, ReadNpyError> {
    let mut len_buf = [0u8; 2];
    read_field(r, &mut len_buf, "header length")?;
    let header_len = LittleEndian::read_u16(&len_buf) as usize;

    let mut header = vec![0u8; header_len];
    read_field(r, &mut header, "header")?;
    debug!("Read {header_len}-byte header block");
    Ok(header)
}

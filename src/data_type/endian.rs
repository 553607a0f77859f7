use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    Big,
    Little,
}

/// Byte order assumed when a descriptor carries no big-endian marker.
pub const NPY_DEFAULT_ENDIAN: Endian = Endian::Little;

impl Default for Endian {
    fn default() -> Self {
        NPY_DEFAULT_ENDIAN
    }
}

impl Endian {
    /// Map a leading descriptor character to a byte order.
    ///
    /// Returns [None] if the character is not a byte-order marker at all.
    /// `<`, `=` and `|` all resolve to little-endian.
    pub(crate) fn from_marker(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Big),
            '<' | '=' | '|' => Some(Self::Little),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers() {
        assert_eq!(Endian::from_marker('>'), Some(Endian::Big));
        for c in ['<', '=', '|'] {
            assert_eq!(Endian::from_marker(c), Some(Endian::Little));
        }
        assert_eq!(Endian::from_marker('i'), None);
    }

    #[test]
    fn ser_endian() {
        assert_eq!(serde_json::to_string(&Endian::Big).unwrap(), r#""big""#);
        let e: Endian = serde_json::from_str(r#""little""#).unwrap();
        assert_eq!(e, Endian::Little);
    }

    #[test]
    fn default_is_little_on_every_host() {
        assert_eq!(Endian::default(), Endian::Little);
        assert_eq!(NPY_DEFAULT_ENDIAN, Endian::Little);
    }
}

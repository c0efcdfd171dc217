//! Literal kind classification.

use std::fmt;

/// The six string-literal forms the scanner recognizes.
///
/// Immutable once classified; every downstream decision (escape grammar,
/// decoded representation, content validation) dispatches on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralKind {
    /// `"..."`: escaped, decodes to Unicode scalar values.
    Str,
    /// `r"..."`, `r#"..."#`, ...: verbatim, decodes to scalar values.
    RawStr,
    /// `b"..."`: escaped, decodes to raw bytes, ASCII-only content.
    ByteStr,
    /// `br"..."`, `br#"..."#`, ...: verbatim raw bytes, ASCII-only.
    RawByteStr,
    /// `c"..."`: escaped, decodes to bytes consumed as a NUL-terminated
    /// string; interior NULs are rejected.
    CStr,
    /// `cr"..."`, `cr#"..."#, ...`: verbatim C-string bytes.
    RawCStr,
}

impl LiteralKind {
    /// Whether content is taken verbatim (no escape processing).
    #[inline]
    pub fn is_raw(self) -> bool {
        matches!(
            self,
            LiteralKind::RawStr | LiteralKind::RawByteStr | LiteralKind::RawCStr
        )
    }

    /// Whether the decoded value is a byte sequence rather than text.
    #[inline]
    pub fn decodes_bytes(self) -> bool {
        matches!(
            self,
            LiteralKind::ByteStr
                | LiteralKind::RawByteStr
                | LiteralKind::CStr
                | LiteralKind::RawCStr
        )
    }

    /// Whether interior NUL bytes are forbidden (C-string variants).
    #[inline]
    pub fn forbids_nul(self) -> bool {
        matches!(self, LiteralKind::CStr | LiteralKind::RawCStr)
    }

    /// Whether content is restricted to ASCII (byte-string variants).
    #[inline]
    pub fn is_ascii_only(self) -> bool {
        matches!(self, LiteralKind::ByteStr | LiteralKind::RawByteStr)
    }

    /// The prefix letters preceding the opening delimiter.
    pub fn prefix(self) -> &'static str {
        match self {
            LiteralKind::Str => "",
            LiteralKind::RawStr => "r",
            LiteralKind::ByteStr => "b",
            LiteralKind::RawByteStr => "br",
            LiteralKind::CStr => "c",
            LiteralKind::RawCStr => "cr",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralKind::Str => "string literal",
            LiteralKind::RawStr => "raw string literal",
            LiteralKind::ByteStr => "byte string literal",
            LiteralKind::RawByteStr => "raw byte string literal",
            LiteralKind::CStr => "C string literal",
            LiteralKind::RawCStr => "raw C string literal",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_kinds() {
        assert!(LiteralKind::RawStr.is_raw());
        assert!(LiteralKind::RawByteStr.is_raw());
        assert!(LiteralKind::RawCStr.is_raw());
        assert!(!LiteralKind::Str.is_raw());
        assert!(!LiteralKind::ByteStr.is_raw());
        assert!(!LiteralKind::CStr.is_raw());
    }

    #[test]
    fn byte_kinds() {
        assert!(LiteralKind::ByteStr.decodes_bytes());
        assert!(LiteralKind::RawByteStr.decodes_bytes());
        assert!(LiteralKind::CStr.decodes_bytes());
        assert!(LiteralKind::RawCStr.decodes_bytes());
        assert!(!LiteralKind::Str.decodes_bytes());
        assert!(!LiteralKind::RawStr.decodes_bytes());
    }

    #[test]
    fn nul_and_ascii_restrictions() {
        assert!(LiteralKind::CStr.forbids_nul());
        assert!(LiteralKind::RawCStr.forbids_nul());
        assert!(!LiteralKind::ByteStr.forbids_nul());
        assert!(LiteralKind::ByteStr.is_ascii_only());
        assert!(LiteralKind::RawByteStr.is_ascii_only());
        assert!(!LiteralKind::CStr.is_ascii_only());
    }

    #[test]
    fn prefixes() {
        assert_eq!(LiteralKind::Str.prefix(), "");
        assert_eq!(LiteralKind::RawStr.prefix(), "r");
        assert_eq!(LiteralKind::ByteStr.prefix(), "b");
        assert_eq!(LiteralKind::RawByteStr.prefix(), "br");
        assert_eq!(LiteralKind::CStr.prefix(), "c");
        assert_eq!(LiteralKind::RawCStr.prefix(), "cr");
    }

    #[test]
    fn display_names() {
        assert_eq!(LiteralKind::Str.to_string(), "string literal");
        assert_eq!(LiteralKind::RawCStr.to_string(), "raw C string literal");
    }
}

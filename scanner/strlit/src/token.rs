//! The scanner's output: a classified literal with its decoded value
//! and accumulated diagnostics.

use strlit_core::Span;

use crate::diagnostic::Diagnostic;
use crate::kind::LiteralKind;

/// Decoded content of a literal.
///
/// Text for the string kinds (a sequence of Unicode scalar values),
/// bytes for the byte-string and C-string kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodedValue {
    /// Scalar-value content (`Str`, `RawStr`).
    Text(String),
    /// Raw byte content (`ByteStr`, `RawByteStr`, `CStr`, `RawCStr`).
    Bytes(Vec<u8>),
}

impl DecodedValue {
    /// Create an empty value of the representation `kind` decodes to.
    pub(crate) fn empty_for(kind: LiteralKind) -> Self {
        if kind.decodes_bytes() {
            DecodedValue::Bytes(Vec::new())
        } else {
            DecodedValue::Text(String::new())
        }
    }

    /// The decoded content as text, when this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(s) => Some(s),
            DecodedValue::Bytes(_) => None,
        }
    }

    /// The decoded content as bytes, regardless of representation.
    ///
    /// For text values this is the UTF-8 encoding.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            DecodedValue::Text(s) => s.as_bytes(),
            DecodedValue::Bytes(b) => b,
        }
    }

    /// Length of the decoded content in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the decoded content is empty.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Append one scalar value: pushed as a `char` for text, as its
    /// UTF-8 encoding for bytes.
    pub(crate) fn push_char(&mut self, c: char) {
        match self {
            DecodedValue::Text(s) => s.push(c),
            DecodedValue::Bytes(b) => {
                let mut utf8 = [0u8; 4];
                b.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }

    /// Append a run of validated UTF-8 text.
    pub(crate) fn push_str(&mut self, s: &str) {
        match self {
            DecodedValue::Text(t) => t.push_str(s),
            DecodedValue::Bytes(b) => b.extend_from_slice(s.as_bytes()),
        }
    }

    /// Append one raw byte.
    ///
    /// # Contract
    ///
    /// Only meaningful for byte representations; the escape grammar
    /// never produces a raw byte for a text kind.
    pub(crate) fn push_byte(&mut self, byte: u8) {
        match self {
            DecodedValue::Text(s) => {
                debug_assert!(byte <= 0x7F, "raw byte pushed into text value");
                s.push(char::from(byte));
            }
            DecodedValue::Bytes(b) => b.push(byte),
        }
    }
}

/// One scanned literal.
///
/// Owned solely by the caller once returned; the scanner holds no
/// reference to it afterward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The classified literal form.
    pub kind: LiteralKind,
    /// Exact extent of the literal in source, including prefix letters,
    /// quotes, and all delimiter hashes. For an unterminated literal the
    /// span ends at end-of-input.
    pub span: Span,
    /// Best-effort decoded content: everything successfully decoded,
    /// even when diagnostics were recorded. Use [`value()`](Self::value)
    /// for the gated accessor.
    pub decoded: DecodedValue,
    /// Problems found while scanning, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Token {
    /// The decoded value, defined only when no fatal diagnostic was
    /// recorded.
    ///
    /// The underlying [`decoded`](Self::decoded) field still carries the
    /// content recovered before the fatal condition, for tooling that
    /// wants the partial result.
    pub fn value(&self) -> Option<&DecodedValue> {
        if self.diagnostics.iter().any(|d| d.kind.is_fatal()) {
            None
        } else {
            Some(&self.decoded)
        }
    }

    /// Whether any diagnostic was recorded.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostic;

    #[test]
    fn empty_for_matches_kind() {
        assert_eq!(
            DecodedValue::empty_for(LiteralKind::Str),
            DecodedValue::Text(String::new())
        );
        assert_eq!(
            DecodedValue::empty_for(LiteralKind::RawCStr),
            DecodedValue::Bytes(Vec::new())
        );
    }

    #[test]
    fn push_char_encodes_utf8_for_bytes() {
        let mut v = DecodedValue::empty_for(LiteralKind::CStr);
        v.push_char('\u{00E6}');
        assert_eq!(v.as_bytes(), &[0xC3, 0xA6]);
    }

    #[test]
    fn push_char_appends_scalar_for_text() {
        let mut v = DecodedValue::empty_for(LiteralKind::Str);
        v.push_char('\u{00E6}');
        assert_eq!(v.as_str(), Some("\u{00E6}"));
    }

    #[test]
    fn as_bytes_on_text_is_utf8() {
        let v = DecodedValue::Text("æ".to_string());
        assert_eq!(v.as_bytes(), &[0xC3, 0xA6]);
        assert_eq!(v.len(), 2);
        assert!(!v.is_empty());
    }

    #[test]
    fn value_gated_on_fatal_diagnostic() {
        let mut token = Token {
            kind: LiteralKind::Str,
            span: Span::new(0, 4),
            decoded: DecodedValue::Text("ab".to_string()),
            diagnostics: Vec::new(),
        };
        assert!(token.value().is_some());

        token
            .diagnostics
            .push(Diagnostic::invalid_escape(Span::new(1, 3), 'q'));
        // Non-fatal diagnostics keep the value defined.
        assert!(token.value().is_some());
        assert!(token.has_diagnostics());

        token
            .diagnostics
            .push(Diagnostic::unterminated(Span::new(0, 4), LiteralKind::Str));
        assert!(token.value().is_none());
        // The partial result stays reachable.
        assert_eq!(token.decoded.as_str(), Some("ab"));
    }
}

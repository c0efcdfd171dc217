//! Diagnostic types for literal scanning.
//!
//! Diagnostics are values attached to the returned token, never raised:
//! a scanner must keep producing tokens for the rest of a source unit
//! after one bad literal. Each diagnostic carries:
//! - WHERE: `span` locating the problem in source
//! - WHAT: `kind` describing what went wrong
//! - HOW: `suggestions` providing actionable fixes
//!
//! Only [`DiagnosticKind::UnterminatedLiteral`] is fatal: it truncates
//! the token at end-of-input and withholds the decoded value. Every other
//! kind is recorded and scanning continues, recovering the remainder of
//! the literal and the stream.

use std::fmt;

use strlit_core::Span;

use crate::kind::LiteralKind;

/// A scanning diagnostic with full context for rendering.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
    /// WHERE the problem occurred.
    pub span: Span,
    /// WHAT went wrong.
    pub kind: DiagnosticKind,
    /// HOW to fix (actionable suggestions).
    pub suggestions: Vec<Suggestion>,
}

/// What kind of scanning problem occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// Input ended before the literal's required terminator. Fatal.
    UnterminatedLiteral { kind: LiteralKind },
    /// The opening `#` run of a raw literal exceeds the supported width.
    DelimiterTooWide { width: u32 },
    /// A byte >= 0x80 in a byte-string literal, which admits only ASCII.
    NonAsciiInByteLiteral { byte: u8 },
    /// Content of a text literal is not valid UTF-8.
    InvalidEncoding,
    /// An unrecognized or malformed escape sequence (e.g. `\q`, `\x9`).
    InvalidEscape { escape: char },
    /// An escape form that exists but is not permitted in this literal
    /// kind (e.g. `\u{...}` in a byte string).
    InvalidEscapeForKind { kind: LiteralKind },
    /// A `\u{...}` escape naming a surrogate or a value above U+10FFFF.
    InvalidCodepoint { value: u32 },
    /// A NUL in a C string literal, which is implicitly NUL-terminated
    /// by its consumer and must not contain interior NULs.
    EmbeddedNul,
}

impl DiagnosticKind {
    /// Whether this kind terminates scanning of the literal.
    ///
    /// Only `UnterminatedLiteral` is fatal; everything else is recorded
    /// and scanning continues.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, DiagnosticKind::UnterminatedLiteral { .. })
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnterminatedLiteral { kind } => {
                write!(f, "unterminated {kind}")
            }
            DiagnosticKind::DelimiterTooWide { width } => {
                write!(f, "raw delimiter of {width} `#` characters is too wide")
            }
            DiagnosticKind::NonAsciiInByteLiteral { byte } => {
                write!(f, "non-ASCII byte 0x{byte:02X} in byte string literal")
            }
            DiagnosticKind::InvalidEncoding => f.write_str("literal content is not valid UTF-8"),
            DiagnosticKind::InvalidEscape { escape } => {
                write!(f, "invalid escape sequence `\\{escape}`")
            }
            DiagnosticKind::InvalidEscapeForKind { kind } => {
                write!(f, "escape sequence not permitted in {kind}")
            }
            DiagnosticKind::InvalidCodepoint { value } => {
                write!(f, "invalid codepoint U+{value:04X} in unicode escape")
            }
            DiagnosticKind::EmbeddedNul => f.write_str("NUL inside C string literal"),
        }
    }
}

/// Suggestion for fixing a scanning problem (the HOW).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Suggestion {
    /// Human-readable message describing the fix.
    pub message: String,
    /// Concrete text replacement for auto-fix, if applicable.
    pub replacement: Option<Replacement>,
    /// Priority (lower = more likely relevant). 0 = most likely.
    pub priority: u8,
}

/// A concrete text replacement for an auto-fix.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Replacement {
    /// The span to replace.
    pub span: Span,
    /// The replacement text.
    pub text: String,
}

impl Suggestion {
    /// Create a text-only suggestion (no code replacement).
    pub fn text(message: impl Into<String>, priority: u8) -> Self {
        Self {
            message: message.into(),
            replacement: None,
            priority,
        }
    }

    /// Create a suggestion with a replacement.
    pub fn replace(message: impl Into<String>, span: Span, text: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: Some(Replacement {
                span,
                text: text.into(),
            }),
            priority: 0,
        }
    }
}

impl Diagnostic {
    /// Create an unterminated-literal diagnostic.
    #[cold]
    pub fn unterminated(span: Span, kind: LiteralKind) -> Self {
        let closer = if kind.is_raw() {
            "add the closing `\"` and matching `#` run"
        } else {
            "add closing `\"`"
        };
        Self {
            span,
            kind: DiagnosticKind::UnterminatedLiteral { kind },
            suggestions: vec![Suggestion::text(closer, 0)],
        }
    }

    /// Create a delimiter-too-wide diagnostic.
    #[cold]
    pub fn delimiter_too_wide(span: Span, width: u32) -> Self {
        Self {
            span,
            kind: DiagnosticKind::DelimiterTooWide { width },
            suggestions: vec![Suggestion::text(
                format!("use at most {} `#` characters", crate::classify::MAX_HASH_RUN),
                0,
            )],
        }
    }

    /// Create a non-ASCII-byte diagnostic for byte-string content.
    #[cold]
    pub fn non_ascii_in_byte_literal(span: Span, byte: u8) -> Self {
        Self {
            span,
            kind: DiagnosticKind::NonAsciiInByteLiteral { byte },
            suggestions: vec![Suggestion::text(
                format!("escape the byte as `\\x{byte:02X}`"),
                0,
            )],
        }
    }

    /// Create an invalid-encoding diagnostic.
    #[cold]
    pub fn invalid_encoding(span: Span) -> Self {
        Self {
            span,
            kind: DiagnosticKind::InvalidEncoding,
            suggestions: Vec::new(),
        }
    }

    /// Create an invalid-escape diagnostic.
    #[cold]
    pub fn invalid_escape(span: Span, escape: char) -> Self {
        Self {
            span,
            kind: DiagnosticKind::InvalidEscape { escape },
            suggestions: vec![Suggestion::text(
                r#"valid escapes are: \n, \r, \t, \0, \\, \', \", \xHH, \u{...}"#,
                1,
            )],
        }
    }

    /// Create an escape-not-permitted-for-kind diagnostic.
    #[cold]
    pub fn escape_not_permitted(span: Span, kind: LiteralKind) -> Self {
        Self {
            span,
            kind: DiagnosticKind::InvalidEscapeForKind { kind },
            suggestions: vec![Suggestion::text(
                r"byte strings admit only byte escapes; use \xHH",
                0,
            )],
        }
    }

    /// Create an invalid-codepoint diagnostic.
    #[cold]
    pub fn invalid_codepoint(span: Span, value: u32) -> Self {
        let detail = if (0xD800..=0xDFFF).contains(&value) {
            "surrogates are not scalar values"
        } else {
            "the largest scalar value is U+10FFFF"
        };
        Self {
            span,
            kind: DiagnosticKind::InvalidCodepoint { value },
            suggestions: vec![Suggestion::text(detail, 0)],
        }
    }

    /// Create an embedded-NUL diagnostic.
    #[cold]
    pub fn embedded_nul(span: Span) -> Self {
        Self {
            span,
            kind: DiagnosticKind::EmbeddedNul,
            suggestions: vec![Suggestion::text(
                "C strings are NUL-terminated; remove the interior NUL",
                0,
            )],
        }
    }

    /// Rendered message for this diagnostic.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Add a suggestion to this diagnostic.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

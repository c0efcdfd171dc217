//! Prefix classification: literal kind and raw-delimiter width.
//!
//! Reads the characters preceding the opening quote. The accepted prefix
//! alphabet is tiny (an optional `b` or `c`, an optional `r`, a `#` run
//! for raw forms, then the `"`), so classification is a handful of byte
//! peeks, never a scan.
//!
//! Classification failure is [`NotALiteral`], a routing signal rather
//! than an error: the caller owns the decision of what else the input
//! could be and retries the same position with a different token rule.

use std::fmt;

use strlit_core::{Cursor, Span};

use crate::diagnostic::Diagnostic;
use crate::kind::LiteralKind;

/// Widest supported raw-delimiter `#` run.
///
/// A run of exactly this width is accepted; only longer runs report
/// [`DelimiterTooWide`](crate::DiagnosticKind::DelimiterTooWide). Scanning
/// still continues with the oversized width so the literal terminates at
/// its matching closer.
pub const MAX_HASH_RUN: u32 = 255;

/// Routing signal: the input at the cursor is not a string literal.
///
/// Not an error. The cursor is restored to its starting position so the
/// caller can retry the same input with another token rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotALiteral;

impl fmt::Display for NotALiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a string literal")
    }
}

impl std::error::Error for NotALiteral {}

/// Successful classification: kind, delimiter width, and any problems
/// found in the opener. The cursor is left at the first content byte.
pub(crate) struct Classified {
    pub(crate) kind: LiteralKind,
    /// Raw-delimiter width; 0 for the escaped kinds.
    pub(crate) hashes: u32,
    /// Opener diagnostics (an oversized `#` run).
    pub(crate) diagnostics: Vec<Diagnostic>,
}

/// Classify the literal starting at the cursor.
///
/// On success the cursor has consumed the prefix letters, any `#` run,
/// and the opening `"`. On [`NotALiteral`] the cursor state is
/// unspecified; the caller restores its own snapshot.
pub(crate) fn classify(cursor: &mut Cursor<'_>) -> Result<Classified, NotALiteral> {
    match cursor.current() {
        b'"' => {
            cursor.advance();
            Ok(Classified {
                kind: LiteralKind::Str,
                hashes: 0,
                diagnostics: Vec::new(),
            })
        }
        b'r' => {
            cursor.advance();
            classify_raw(cursor, LiteralKind::RawStr)
        }
        b'b' => match cursor.peek() {
            b'"' => {
                cursor.advance_n(2);
                Ok(Classified {
                    kind: LiteralKind::ByteStr,
                    hashes: 0,
                    diagnostics: Vec::new(),
                })
            }
            b'r' => {
                cursor.advance_n(2);
                classify_raw(cursor, LiteralKind::RawByteStr)
            }
            _ => Err(NotALiteral),
        },
        b'c' => match cursor.peek() {
            b'"' => {
                cursor.advance_n(2);
                Ok(Classified {
                    kind: LiteralKind::CStr,
                    hashes: 0,
                    diagnostics: Vec::new(),
                })
            }
            b'r' => {
                cursor.advance_n(2);
                classify_raw(cursor, LiteralKind::RawCStr)
            }
            _ => Err(NotALiteral),
        },
        _ => Err(NotALiteral),
    }
}

/// Count the `#` run and require the opening quote of a raw literal.
fn classify_raw(cursor: &mut Cursor<'_>, kind: LiteralKind) -> Result<Classified, NotALiteral> {
    let hash_start = cursor.pos();
    cursor.eat_while(|b| b == b'#');
    let hashes = cursor.pos() - hash_start;

    // The quote check comes first: without one this is no literal at all
    // (e.g. a raw identifier), and any width complaint would be noise.
    if cursor.current() != b'"' {
        return Err(NotALiteral);
    }
    cursor.advance();

    let mut diagnostics = Vec::new();
    if hashes > MAX_HASH_RUN {
        diagnostics.push(Diagnostic::delimiter_too_wide(
            Span::new(hash_start, hash_start + hashes),
            hashes,
        ));
    }

    Ok(Classified {
        kind,
        hashes,
        diagnostics,
    })
}

//! Token assembly: classification, content scanning, packaging.
//!
//! One operation is exposed: [`LiteralScanner::scan_literal`]. It drives
//! the prefix classifier, dispatches to the raw or escaped content path,
//! and packages the result into a [`Token`] whose span ends immediately
//! after the consumed terminator.
//!
//! [`NotALiteral`] is the only non-`Token` outcome, and it is a signal,
//! not an error: the cursor is restored so the caller can retry the same
//! position with a different token rule. Everything else, bad escapes and
//! oversized delimiters and even a missing terminator, comes back as
//! diagnostics on the token, so a single corrupt literal never aborts
//! scanning of the rest of the stream.

use strlit_core::{Cursor, SourceBuffer, Span};

use crate::classify::{classify, Classified, NotALiteral};
use crate::diagnostic::Diagnostic;
use crate::escape::{scan_escaped_content, EscapedContent};
use crate::raw::{decode_raw, scan_raw_content};
use crate::token::Token;

/// Scans string literals from a cursor.
///
/// Stateless between calls: each `scan_literal()` is an independent,
/// pure function of the buffer and the cursor position. The scanner holds
/// no reference to returned tokens.
pub struct LiteralScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> LiteralScanner<'a> {
    /// Create a scanner positioned at the cursor.
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// Snapshot of the current cursor, for the caller's own bookkeeping.
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor
    }

    /// Scan one string literal starting at the current position.
    ///
    /// On success the cursor sits immediately after the consumed
    /// terminator and the token's `span` covers the whole literal,
    /// prefix and delimiters included. On [`NotALiteral`] the cursor is
    /// unchanged.
    pub fn scan_literal(&mut self) -> Result<Token, NotALiteral> {
        let start = self.cursor; // Copy snapshot for backtracking

        let classified = match classify(&mut self.cursor) {
            Ok(classified) => classified,
            Err(signal) => {
                self.cursor = start;
                return Err(signal);
            }
        };
        let Classified {
            kind,
            hashes,
            mut diagnostics,
        } = classified;

        let (decoded, terminated) = if kind.is_raw() {
            let raw = scan_raw_content(&mut self.cursor, hashes);
            let content = self.cursor.slice(raw.content.start, raw.content.end);
            let (decoded, mut content_diagnostics) =
                decode_raw(kind, content, raw.content.start);
            diagnostics.append(&mut content_diagnostics);
            (decoded, raw.terminated)
        } else {
            let EscapedContent {
                decoded,
                diagnostics: mut content_diagnostics,
                terminated,
            } = scan_escaped_content(&mut self.cursor, kind);
            diagnostics.append(&mut content_diagnostics);
            (decoded, terminated)
        };

        let span = Span::new(start.pos(), self.cursor.pos());
        if !terminated {
            diagnostics.push(Diagnostic::unterminated(span, kind));
        }

        Ok(Token {
            kind,
            span,
            decoded,
            diagnostics,
        })
    }
}

/// One-shot convenience: scan the literal starting at `offset`.
pub fn scan_literal_at(buffer: &SourceBuffer, offset: u32) -> Result<Token, NotALiteral> {
    LiteralScanner::new(buffer.cursor_at(offset)).scan_literal()
}

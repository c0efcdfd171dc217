//! Scanner for string-literal forms in systems-language source text.
//!
//! Recognizes six literal forms (plain strings, raw strings, byte
//! strings, raw byte strings, and the two C-string variants), including
//! the arbitrary-width `#` delimiter mechanism of the raw forms and the
//! per-kind escape grammars of the escaped forms.
//!
//! # Architecture
//!
//! ```text
//! source bytes → SourceBuffer → Cursor
//!                                 │
//!                         LiteralScanner::scan_literal
//!                                 │
//!               classify ─→ raw content │ escaped content ─→ Token
//! ```
//!
//! The caller's tokenizer positions a cursor at a candidate literal start
//! (an optional `b`/`c`, an optional `r` with `#` marks, or a bare quote)
//! and calls [`LiteralScanner::scan_literal`]. The result is either a
//! [`Token`] carrying kind, exact source span, best-effort decoded value,
//! and any [`Diagnostic`]s, or the [`NotALiteral`] routing signal telling
//! the caller to retry the position with a different token rule.
//!
//! # Diagnostics Are Values
//!
//! A malformed literal produces one token carrying possibly several
//! diagnostics plus a best-effort decoded value; nothing is thrown. Only
//! an unterminated literal is fatal, and even then the token reports the
//! content recovered up to end-of-input. See [`Token::value`] for the
//! gated accessor.
//!
//! # Concurrency
//!
//! Scanning is a pure function of `(buffer, position)`: no I/O, no shared
//! mutable state. Independent scans may run in parallel over the same
//! buffer by read-only reference.

mod classify;
mod diagnostic;
mod escape;
mod kind;
mod raw;
mod scan;
mod token;

pub use classify::{NotALiteral, MAX_HASH_RUN};
pub use diagnostic::{Diagnostic, DiagnosticKind, Replacement, Suggestion};
pub use kind::LiteralKind;
pub use scan::{scan_literal_at, LiteralScanner};
pub use token::{DecodedValue, Token};

// Re-export the scanning primitives so most callers need only this crate.
pub use strlit_core::{Cursor, SourceBuffer, SourcePosition, Span};

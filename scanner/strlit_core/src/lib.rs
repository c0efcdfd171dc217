//! Standalone scanning primitives for string-literal lexing.
//!
//! This crate owns the byte-level plumbing shared by every scan: a
//! sentinel-terminated [`SourceBuffer`], a zero-cost [`Cursor`] with
//! SIMD-accelerated content skipping, byte-offset [`Span`]s, and the
//! newline index that derives a [`SourcePosition`] from an offset.
//!
//! It deliberately knows nothing about literal kinds, escapes, or
//! diagnostics; those live in the `strlit` crate. Keeping this layer
//! standalone lets external tools (highlighters, formatters) reuse the
//! cursor machinery without pulling in the scanner.

mod cursor;
mod source_buffer;
mod span;

pub use cursor::Cursor;
pub use source_buffer::{SourceBuffer, SourcePosition};
pub use span::Span;

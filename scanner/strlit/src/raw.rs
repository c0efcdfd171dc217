//! Raw-literal content scanning.
//!
//! No escape processing happens here: every byte between the delimiters
//! is literal, backslashes included. The only structure in raw content is
//! the terminator: a `"` followed by exactly as many `#` as the opener.
//!
//! The terminator match is an explicit scan-and-count loop, not a pattern
//! search: a candidate `"` whose trailing `#` run is shorter than the
//! opener's is ordinary content, and a run longer than the opener's must
//! leave the surplus `#` unconsumed for the next token. Both cases give
//! greedy general-purpose matchers wrong answers.

use strlit_core::{Cursor, Span};

use crate::diagnostic::Diagnostic;
use crate::kind::LiteralKind;
use crate::token::DecodedValue;

/// Extent of raw content, exclusive of the delimiters.
pub(crate) struct RawContent {
    /// Content span: from the byte after the opening `"` up to (not
    /// including) the closing `"`. Ends at end-of-input when
    /// unterminated.
    pub(crate) content: Span,
    /// Whether the exact-width terminator was found.
    pub(crate) terminated: bool,
}

/// Scan raw content to its exact-width terminator.
///
/// The cursor starts at the first content byte. On return it sits
/// immediately after the consumed terminator (`"` plus `hashes` `#`), or
/// at end-of-input when unterminated.
pub(crate) fn scan_raw_content(cursor: &mut Cursor<'_>, hashes: u32) -> RawContent {
    let content_start = cursor.pos();
    loop {
        if !cursor.skip_to_quote() {
            return RawContent {
                content: Span::new(content_start, cursor.pos()),
                terminated: false,
            };
        }
        let quote_pos = cursor.pos();
        cursor.advance(); // consume candidate '"'

        // Count trailing hashes, but never more than the opener's width:
        // surplus `#` belong to the tokens after this literal.
        let mut run = 0u32;
        while run < hashes && cursor.current() == b'#' {
            cursor.advance();
            run += 1;
        }
        if run == hashes {
            return RawContent {
                content: Span::new(content_start, quote_pos),
                terminated: true,
            };
        }
        // Short run: the quote and its hashes were ordinary content.
    }
}

/// Decode raw content bytes per literal kind.
///
/// Raw decoding is the identity on content bytes, modulo the per-kind
/// validation: UTF-8 for text, ASCII for byte strings, no interior NUL
/// for C strings. Offending bytes are reported and dropped from the
/// decoded value.
#[allow(
    clippy::cast_possible_truncation,
    reason = "content length is bounded by source_len which fits in u32"
)]
pub(crate) fn decode_raw(
    kind: LiteralKind,
    bytes: &[u8],
    content_start: u32,
) -> (DecodedValue, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let decoded = match kind {
        LiteralKind::RawStr => DecodedValue::Text(decode_text(
            bytes,
            content_start,
            &mut diagnostics,
        )),
        LiteralKind::RawByteStr => {
            let mut value = Vec::with_capacity(bytes.len());
            let mut i = 0;
            while i < bytes.len() {
                let b = bytes[i];
                if b < 0x80 {
                    value.push(b);
                    i += 1;
                } else {
                    // Group the whole (possibly multi-byte) character into
                    // one diagnostic instead of one per continuation byte.
                    let width = Cursor::utf8_char_width(b) as usize;
                    let mut j = i + 1;
                    while j < bytes.len() && j < i + width && (0x80..=0xBF).contains(&bytes[j]) {
                        j += 1;
                    }
                    diagnostics.push(Diagnostic::non_ascii_in_byte_literal(
                        Span::new(content_start + i as u32, content_start + j as u32),
                        b,
                    ));
                    i = j;
                }
            }
            DecodedValue::Bytes(value)
        }
        LiteralKind::RawCStr => {
            let mut value = Vec::with_capacity(bytes.len());
            for (i, &b) in bytes.iter().enumerate() {
                if b == 0 {
                    diagnostics.push(Diagnostic::embedded_nul(Span::new(
                        content_start + i as u32,
                        content_start + i as u32 + 1,
                    )));
                } else {
                    value.push(b);
                }
            }
            DecodedValue::Bytes(value)
        }
        _ => unreachable!("escaped literal kinds never reach the raw decoder"),
    };
    (decoded, diagnostics)
}

/// Validate raw text content as UTF-8, reporting each invalid sequence
/// and substituting U+FFFD so the rest of the content survives.
#[allow(
    clippy::cast_possible_truncation,
    reason = "content length is bounded by source_len which fits in u32"
)]
fn decode_text(bytes: &[u8], content_start: u32, diagnostics: &mut Vec<Diagnostic>) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut rest = bytes;
    let mut offset = content_start;
    loop {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                text.push_str(s);
                return text;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                text.push_str(std::str::from_utf8(&rest[..valid]).unwrap_or(""));
                let bad = e.error_len().unwrap_or(rest.len() - valid);
                diagnostics.push(Diagnostic::invalid_encoding(Span::new(
                    offset + valid as u32,
                    offset + (valid + bad) as u32,
                )));
                text.push('\u{FFFD}');
                rest = &rest[valid + bad..];
                offset += (valid + bad) as u32;
            }
        }
    }
}

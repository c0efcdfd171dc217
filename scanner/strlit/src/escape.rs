//! Escape decoding for the non-raw literal kinds.
//!
//! Content is consumed in two alternating phases: a SIMD-accelerated skip
//! over ordinary bytes (appended verbatim, with per-kind validation),
//! then single-byte dispatch on whatever stopped the skip: the closing
//! quote, a backslash, an interior NUL, or end-of-input.
//!
//! Each kind has its own escape grammar; the differences are data
//! (permitted ranges and output encodings), so dispatch is a `match` on
//! [`LiteralKind`], not behavior behind a trait. All escape problems are
//! pushed into the diagnostic accumulator and decoding continues, so one
//! bad escape costs one replacement character, not the rest of the
//! literal.

use strlit_core::{Cursor, Span};

use crate::diagnostic::{Diagnostic, Suggestion};
use crate::kind::LiteralKind;
use crate::token::DecodedValue;

/// Result of scanning the content of an escaped literal.
pub(crate) struct EscapedContent {
    pub(crate) decoded: DecodedValue,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Whether the closing quote was found.
    pub(crate) terminated: bool,
}

/// Scan escaped content up to the closing quote.
///
/// The cursor starts at the first content byte. On return it sits
/// immediately after the closing quote, or at end-of-input when
/// unterminated.
pub(crate) fn scan_escaped_content(cursor: &mut Cursor<'_>, kind: LiteralKind) -> EscapedContent {
    let mut decoded = DecodedValue::empty_for(kind);
    let mut diagnostics = Vec::new();

    let terminated = loop {
        let segment_start = cursor.pos();
        let delim = cursor.skip_to_content_delim();
        if cursor.pos() > segment_start {
            append_verbatim(
                kind,
                cursor.slice(segment_start, cursor.pos()),
                segment_start,
                &mut decoded,
                &mut diagnostics,
            );
        }
        match delim {
            b'"' => {
                cursor.advance();
                break true;
            }
            b'\\' => decode_escape(cursor, kind, &mut decoded, &mut diagnostics),
            _ => {
                if cursor.is_eof() {
                    break false;
                }
                // Interior NUL byte: literal content, except in C strings.
                if kind.forbids_nul() {
                    diagnostics.push(Diagnostic::embedded_nul(Span::new(
                        cursor.pos(),
                        cursor.pos() + 1,
                    )));
                } else {
                    decoded.push_byte(0);
                }
                cursor.advance();
            }
        }
    };

    EscapedContent {
        decoded,
        diagnostics,
        terminated,
    }
}

/// Append a run of ordinary (non-delimiter) bytes with per-kind
/// validation.
#[allow(
    clippy::cast_possible_truncation,
    reason = "segment length is bounded by source_len which fits in u32"
)]
fn append_verbatim(
    kind: LiteralKind,
    bytes: &[u8],
    base: u32,
    decoded: &mut DecodedValue,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if kind.is_ascii_only() {
        // Byte strings: each byte must be ASCII.
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b < 0x80 {
                decoded.push_byte(b);
                i += 1;
            } else {
                // One diagnostic per character, not per continuation byte.
                let width = Cursor::utf8_char_width(b) as usize;
                let mut j = i + 1;
                while j < bytes.len() && j < i + width && (0x80..=0xBF).contains(&bytes[j]) {
                    j += 1;
                }
                diagnostics.push(Diagnostic::non_ascii_in_byte_literal(
                    Span::new(base + i as u32, base + j as u32),
                    b,
                ));
                i = j;
            }
        }
        return;
    }

    // Text and C-string content: scalar values, so the bytes must be
    // valid UTF-8. Invalid sequences are reported and replaced.
    let mut rest = bytes;
    let mut offset = base;
    loop {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                decoded.push_str(s);
                return;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                decoded.push_str(std::str::from_utf8(&rest[..valid]).unwrap_or(""));
                let bad = e.error_len().unwrap_or(rest.len() - valid);
                diagnostics.push(Diagnostic::invalid_encoding(Span::new(
                    offset + valid as u32,
                    offset + (valid + bad) as u32,
                )));
                decoded.push_char('\u{FFFD}');
                rest = &rest[valid + bad..];
                offset += (valid + bad) as u32;
            }
        }
    }
}

/// Decode one escape sequence. The cursor sits on the backslash.
fn decode_escape(
    cursor: &mut Cursor<'_>,
    kind: LiteralKind,
    decoded: &mut DecodedValue,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let esc_start = cursor.pos();
    cursor.advance(); // consume '\'

    if cursor.is_eof() {
        // Trailing backslash; the outer loop reports the missing quote.
        diagnostics.push(Diagnostic::invalid_escape(
            Span::new(esc_start, cursor.pos()),
            '\\',
        ));
        return;
    }

    match cursor.current() {
        b @ (b'\\' | b'"' | b'\'' | b'n' | b'r' | b't') => {
            cursor.advance();
            let value = match b {
                b'n' => '\n',
                b'r' => '\r',
                b't' => '\t',
                other => char::from(other),
            };
            decoded.push_char(value);
        }
        b'0' => {
            cursor.advance();
            if kind.forbids_nul() {
                diagnostics.push(Diagnostic::embedded_nul(Span::new(esc_start, cursor.pos())));
            } else {
                decoded.push_char('\0');
            }
        }
        b'x' => {
            cursor.advance();
            decode_hex_escape(cursor, kind, esc_start, decoded, diagnostics);
        }
        b'u' => {
            cursor.advance();
            decode_unicode_escape(cursor, kind, esc_start, decoded, diagnostics);
        }
        b'\n' | b'\r' => {
            // Line continuation: drop the terminator and all following
            // whitespace up to the next non-whitespace.
            cursor.advance();
            cursor.eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'));
        }
        _ => {
            let (ch, width) = current_char(cursor);
            cursor.advance_n(width);
            diagnostics.push(Diagnostic::invalid_escape(
                Span::new(esc_start, cursor.pos()),
                ch,
            ));
            push_replacement(kind, decoded);
        }
    }
}

/// Decode `\xHH`. The cursor sits after the `x`.
fn decode_hex_escape(
    cursor: &mut Cursor<'_>,
    kind: LiteralKind,
    esc_start: u32,
    decoded: &mut DecodedValue,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let (Some(hi), Some(lo)) = (hex_digit(cursor.current()), hex_digit(cursor.peek())) else {
        // Consume a lone digit so the span names the whole bad form.
        if hex_digit(cursor.current()).is_some() {
            cursor.advance();
        }
        diagnostics.push(Diagnostic::invalid_escape(
            Span::new(esc_start, cursor.pos()),
            'x',
        ));
        push_replacement(kind, decoded);
        return;
    };
    cursor.advance_n(2);
    let value = hi * 16 + lo;
    let span = Span::new(esc_start, cursor.pos());

    match kind {
        LiteralKind::Str => {
            // A hex escape names one scalar value, so 0x80..=0xFF (which
            // would be a bare continuation byte) is out of range here.
            if value <= 0x7F {
                decoded.push_char(char::from(value));
            } else {
                diagnostics.push(Diagnostic::invalid_escape(span, 'x').with_suggestion(
                    Suggestion::text(
                        r"hex escapes in string literals must be at most \x7F; use \u{...} for larger values",
                        0,
                    ),
                ));
                decoded.push_char('\u{FFFD}');
            }
        }
        LiteralKind::ByteStr => decoded.push_byte(value),
        LiteralKind::CStr => {
            if value == 0 {
                diagnostics.push(Diagnostic::embedded_nul(span));
            } else {
                decoded.push_byte(value);
            }
        }
        _ => unreachable!("raw literal kinds have no escapes"),
    }
}

/// Decode `\u{H..H}`. The cursor sits after the `u`.
///
/// The form is parsed even for kinds that forbid it, so scanning resumes
/// cleanly after the closing brace.
fn decode_unicode_escape(
    cursor: &mut Cursor<'_>,
    kind: LiteralKind,
    esc_start: u32,
    decoded: &mut DecodedValue,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if cursor.current() != b'{' {
        diagnostics.push(Diagnostic::invalid_escape(
            Span::new(esc_start, cursor.pos()),
            'u',
        ));
        push_replacement(kind, decoded);
        return;
    }
    cursor.advance();

    let mut value: u32 = 0;
    let mut digits: u32 = 0;
    while let Some(d) = hex_digit(cursor.current()) {
        cursor.advance();
        digits += 1;
        if digits <= 6 {
            value = value * 16 + u32::from(d);
        }
    }
    let closed = cursor.current() == b'}';
    if closed {
        cursor.advance();
    }
    let span = Span::new(esc_start, cursor.pos());

    if !closed || digits == 0 || digits > 6 {
        diagnostics.push(Diagnostic::invalid_escape(span, 'u'));
        push_replacement(kind, decoded);
        return;
    }
    if kind.is_ascii_only() {
        diagnostics.push(Diagnostic::escape_not_permitted(span, kind));
        return;
    }
    // from_u32 rejects surrogates and values above U+10FFFF.
    let Some(c) = char::from_u32(value) else {
        diagnostics.push(Diagnostic::invalid_codepoint(span, value));
        decoded.push_char('\u{FFFD}');
        return;
    };
    if c == '\0' && kind.forbids_nul() {
        diagnostics.push(Diagnostic::embedded_nul(span));
        return;
    }
    decoded.push_char(c);
}

/// Replacement for an invalid escape: U+FFFD where the output can
/// represent it; byte strings get nothing.
fn push_replacement(kind: LiteralKind, decoded: &mut DecodedValue) {
    if !kind.is_ascii_only() {
        decoded.push_char('\u{FFFD}');
    }
}

/// The character at the cursor, for diagnostic payloads. Falls back to
/// U+FFFD (width 1) on invalid UTF-8.
#[allow(
    clippy::cast_possible_truncation,
    reason = "char::len_utf8() is 1..=4, fits u32"
)]
fn current_char(cursor: &Cursor<'_>) -> (char, u32) {
    let width = Cursor::utf8_char_width(cursor.current());
    let end = (cursor.pos() + width).min(cursor.source_len());
    let bytes = cursor.slice(cursor.pos(), end);
    match std::str::from_utf8(bytes).ok().and_then(|s| s.chars().next()) {
        Some(c) => (c, c.len_utf8() as u32),
        None => ('\u{FFFD}', 1),
    }
}

/// Value of an ASCII hex digit, or `None`.
#[inline]
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

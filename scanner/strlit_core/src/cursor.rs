//! Zero-cost cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. End-of-input is
//! detected when the current byte equals the sentinel (`0x00`) and the
//! position has reached or exceeded the source length. No explicit bounds
//! checking is performed in the common case -- the sentinel guarantees
//! safe termination.
//!
//! # Interior Null Bytes
//!
//! If the source contains interior null bytes, the cursor distinguishes
//! them from end-of-input by comparing `pos` against `source_len`. A null
//! at `pos < source_len` is an interior null (literal content, or an
//! embedded-NUL diagnostic depending on the literal kind); a null at
//! `pos >= source_len` is the sentinel.

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots for backtracking
/// when a candidate literal turns out not to be one.
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (cache-line padding). This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel). All bytes after the
    /// sentinel must also be `0x00` (padding). This is guaranteed by
    /// `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` at end-of-input (the sentinel byte). Interior null
    /// bytes also return `0x00`; use [`is_eof()`](Self::is_eof) to
    /// distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position: the sentinel and cache-line padding
    /// guarantee valid reads beyond the source content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Returns the byte two positions ahead of current.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has reached end-of-input.
    ///
    /// End-of-input is when the current byte is the sentinel (`0x00`) and
    /// the position is at or past the source length. This distinguishes
    /// it from interior null bytes.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Extract a source byte slice.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the source content
    /// (`end <= source_len`). This holds when both offsets come from the
    /// scanner's own boundary tracking.
    pub fn slice(&self, start: u32, end: u32) -> &'a [u8] {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.buf[start as usize..end as usize]
    }

    /// Extract a source byte slice from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a [u8] {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`, so the sentinel naturally
    /// terminates the loop. This is true for all byte classification
    /// predicates used by the scanner.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with
    /// `byte`.
    ///
    /// Uses the leading byte to determine character width:
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past ordinary escaped-literal content to the next
    /// interesting byte. Returns the byte found, or 0 at end-of-input.
    ///
    /// "Interesting" bytes are `"` (candidate terminator), `\` (escape
    /// introducer), and `0x00` (interior null, which needs per-kind
    /// handling). Uses memchr3 for SIMD-accelerated search. Scans only
    /// within source content; if nothing is found the cursor lands on the
    /// sentinel.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_content_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(off) = memchr::memchr3(b'"', b'\\', 0, remaining) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0 // sentinel
        }
    }

    /// Advance to the next `"` byte. Returns `true` if one was found;
    /// otherwise the cursor lands at end-of-input.
    ///
    /// Used by the raw-literal scanner, where every byte before the
    /// candidate quote is verbatim content.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_quote(&mut self) -> bool {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(off) = memchr::memchr(b'"', remaining) {
            self.pos += off as u32;
            true
        } else {
            self.pos = self.source_len;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::SourceBuffer;

    // === Basic Navigation ===

    #[test]
    fn current_returns_first_byte() {
        let buf = SourceBuffer::new(b"abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.current(), b'a');
    }

    #[test]
    fn advance_moves_forward() {
        let buf = SourceBuffer::new(b"abc");
        let mut cursor = buf.cursor();
        cursor.advance();
        assert_eq!(cursor.current(), b'b');
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn advance_n_moves_multiple() {
        let buf = SourceBuffer::new(b"abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.current(), b'd');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn advance_through_entire_source() {
        let buf = SourceBuffer::new(b"hi");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.current(), b'h');
        cursor.advance();
        assert_eq!(cursor.current(), b'i');
        cursor.advance();
        assert!(cursor.is_eof());
    }

    // === Peek ===

    #[test]
    fn peek_returns_next_byte() {
        let buf = SourceBuffer::new(b"abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek(), b'b');
        assert_eq!(cursor.peek2(), b'c');
    }

    #[test]
    fn peek_near_end_returns_sentinel() {
        let buf = SourceBuffer::new(b"ab");
        let mut cursor = buf.cursor();
        cursor.advance(); // at 'b'
        assert_eq!(cursor.peek(), 0); // sentinel
    }

    #[test]
    fn peek2_near_end_returns_zero() {
        let buf = SourceBuffer::new(b"a");
        let cursor = buf.cursor();
        // current='a', peek=sentinel(0), peek2=padding(0)
        assert_eq!(cursor.peek2(), 0);
    }

    // === EOF Detection ===

    #[test]
    fn is_eof_at_sentinel() {
        let buf = SourceBuffer::new(b"x");
        let mut cursor = buf.cursor();
        assert!(!cursor.is_eof());
        cursor.advance(); // past 'x', at sentinel
        assert!(cursor.is_eof());
    }

    #[test]
    fn is_eof_on_empty_source() {
        let buf = SourceBuffer::new(b"");
        let cursor = buf.cursor();
        assert!(cursor.is_eof());
    }

    #[test]
    fn interior_null_is_not_eof() {
        let buf = SourceBuffer::new(b"a\0b");
        let mut cursor = buf.cursor();
        cursor.advance(); // at '\0' (interior null)
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_eof()); // pos=1 < source_len=3
        cursor.advance(); // at 'b'
        assert_eq!(cursor.current(), b'b');
    }

    // === Slice ===

    #[test]
    fn slice_extracts_bytes() {
        let buf = SourceBuffer::new(b"hello world");
        let cursor = buf.cursor();
        assert_eq!(cursor.slice(0, 5), b"hello");
        assert_eq!(cursor.slice(6, 11), b"world");
    }

    #[test]
    fn slice_from_extracts_to_current() {
        let buf = SourceBuffer::new(b"abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.slice_from(0), b"abc");
        assert_eq!(cursor.slice_from(1), b"bc");
    }

    #[test]
    fn slice_empty_range() {
        let buf = SourceBuffer::new(b"hello");
        let cursor = buf.cursor();
        assert_eq!(cursor.slice(2, 2), b"");
    }

    // === eat_while ===

    #[test]
    fn eat_while_consumes_matching_bytes() {
        let buf = SourceBuffer::new(b"aaabbb");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'b');
    }

    #[test]
    fn eat_while_stops_at_sentinel() {
        let buf = SourceBuffer::new(b"aaa");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.is_eof());
    }

    #[test]
    fn eat_while_no_match() {
        let buf = SourceBuffer::new(b"hello");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'z');
        assert_eq!(cursor.pos(), 0); // didn't move
    }

    #[test]
    fn eat_while_counts_hash_run() {
        let buf = SourceBuffer::new(b"###\"content");
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b == b'#');
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.current(), b'"');
    }

    // === Copy Semantics ===

    #[test]
    fn cursor_is_copy_for_checkpointing() {
        let buf = SourceBuffer::new(b"abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);

        // Snapshot via Copy
        let saved = cursor;

        // Advance original
        cursor.advance_n(3);
        assert_eq!(cursor.pos(), 5);

        // Saved is still at old position
        assert_eq!(saved.pos(), 2);
        assert_eq!(saved.current(), b'c');
    }

    // === skip_to_content_delim ===

    #[test]
    fn skip_to_content_delim_finds_quote() {
        let buf = SourceBuffer::new(b"hello\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_content_delim();
        assert_eq!(b, b'"');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_content_delim_finds_backslash() {
        let buf = SourceBuffer::new(b"hello\\nrest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_content_delim();
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn skip_to_content_delim_finds_interior_null() {
        let buf = SourceBuffer::new(b"ab\0cd");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_content_delim();
        assert_eq!(b, 0);
        assert_eq!(cursor.pos(), 2);
        assert!(!cursor.is_eof());
    }

    #[test]
    fn skip_to_content_delim_returns_earliest() {
        // backslash before quote
        let buf = SourceBuffer::new(b"abc\\\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_content_delim();
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn skip_to_content_delim_eof() {
        let buf = SourceBuffer::new(b"hello");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_content_delim();
        assert_eq!(b, 0);
        assert!(cursor.is_eof());
    }

    #[test]
    fn skip_to_content_delim_newline_is_ordinary() {
        // Literals may span lines; newlines are not delimiters.
        let buf = SourceBuffer::new(b"ab\ncd\"x");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_content_delim();
        assert_eq!(b, b'"');
        assert_eq!(cursor.pos(), 5);
    }

    // === skip_to_quote ===

    #[test]
    fn skip_to_quote_finds_quote() {
        let buf = SourceBuffer::new(b"raw content\"rest");
        let mut cursor = buf.cursor();
        assert!(cursor.skip_to_quote());
        assert_eq!(cursor.pos(), 11);
        assert_eq!(cursor.current(), b'"');
    }

    #[test]
    fn skip_to_quote_ignores_backslash() {
        // Backslashes are ordinary bytes in raw content.
        let buf = SourceBuffer::new(b"a\\b\"x");
        let mut cursor = buf.cursor();
        assert!(cursor.skip_to_quote());
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn skip_to_quote_eof() {
        let buf = SourceBuffer::new(b"no quote here");
        let mut cursor = buf.cursor();
        assert!(!cursor.skip_to_quote());
        assert!(cursor.is_eof());
    }

    #[test]
    fn skip_to_quote_at_first_position() {
        let buf = SourceBuffer::new(b"\"hello");
        let mut cursor = buf.cursor();
        assert!(cursor.skip_to_quote());
        assert_eq!(cursor.pos(), 0);
    }

    // === utf8_char_width ===

    #[test]
    fn utf8_char_width_classes() {
        use super::Cursor;
        assert_eq!(Cursor::utf8_char_width(b'a'), 1);
        assert_eq!(Cursor::utf8_char_width(0xC3), 2); // 'æ' lead byte
        assert_eq!(Cursor::utf8_char_width(0xE2), 3);
        assert_eq!(Cursor::utf8_char_width(0xF0), 4);
        assert_eq!(Cursor::utf8_char_width(0x80), 1); // continuation byte
    }

    // === Property tests ===

    mod proptest_skips {
        use crate::SourceBuffer;
        use proptest::prelude::*;

        /// Scalar reference for `skip_to_content_delim`.
        fn scalar_find_delim(bytes: &[u8]) -> usize {
            bytes
                .iter()
                .position(|&b| b == b'"' || b == b'\\' || b == 0)
                .unwrap_or(bytes.len())
        }

        proptest! {
            #[test]
            fn skip_matches_scalar_random(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
                let buf = SourceBuffer::new(&bytes);
                let mut cursor = buf.cursor();
                cursor.skip_to_content_delim();
                prop_assert_eq!(cursor.pos() as usize, scalar_find_delim(&bytes));
            }

            #[test]
            fn skip_to_quote_matches_scalar(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
                let expected = bytes
                    .iter()
                    .position(|&b| b == b'"')
                    .unwrap_or(bytes.len());
                let buf = SourceBuffer::new(&bytes);
                let mut cursor = buf.cursor();
                cursor.skip_to_quote();
                prop_assert_eq!(cursor.pos() as usize, expected);
            }
        }
    }
}

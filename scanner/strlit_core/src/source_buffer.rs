//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the scanner to detect end-of-input without explicit bounds
//! checking. The total buffer size is rounded up to the next 64-byte
//! boundary for cache-line alignment, which also provides safe padding
//! for `peek()` and `peek2()` near the end of the buffer.
//!
//! # Bytes, Not `&str`
//!
//! The buffer is constructed from raw bytes rather than a validated
//! string. Raw string literals take their content verbatim, so a scan
//! must be able to observe invalid UTF-8 in content and report it as a
//! diagnostic instead of refusing the whole source up front. UTF-8
//! validation happens per literal, at decode time.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer for zero-bounds-check scanning.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`. All subsequent
/// bytes (cache-line padding) are also `0x00`, ensuring safe reads for
/// `peek()` and `peek2()` near the end of the buffer.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Byte offsets of line starts: `line_starts[0] == 0`, then one entry
    /// per byte following a `\n`.
    line_starts: Vec<u32>,
}

/// A resolved source position: byte offset plus 1-based line and column.
///
/// Derived from an offset via [`SourceBuffer::position`]; nothing else
/// produces or mutates one. The column counts bytes within the line, not
/// display cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePosition {
    /// Byte offset from the start of the buffer.
    pub offset: u32,
    /// 1-based line number.
    pub line: u32,
    /// 1-based byte column within the line.
    pub column: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source bytes.
    ///
    /// Copies the bytes into a cache-line-aligned buffer with a `0x00`
    /// sentinel appended, and builds the newline index used by
    /// [`position()`](Self::position).
    ///
    /// Sources larger than `u32::MAX` bytes saturate `source_len`;
    /// callers feeding multi-gigabyte inputs are expected to reject them
    /// upstream.
    pub fn new(source: &[u8]) -> Self {
        let source_len = source.len();

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Allocate zero-filled buffer, then copy source bytes.
        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        let line_starts = build_line_starts(source);

        // Saturate source_len to u32::MAX for oversized inputs.
        let source_len_u32 = u32::try_from(source_len).unwrap_or(u32::MAX);

        Self {
            buf,
            source_len: source_len_u32,
            line_starts,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    ///
    /// The byte at index [`len()`](Self::len) is the sentinel (`0x00`).
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Create a [`Cursor`] positioned at `offset`.
    ///
    /// Offsets past the end of the source clamp to end-of-input.
    pub fn cursor_at(&self, offset: u32) -> Cursor<'_> {
        let mut cursor = self.cursor();
        cursor.advance_n(offset.min(self.source_len));
        cursor
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Resolve a byte offset to a [`SourcePosition`] (1-based line/column).
    ///
    /// Offsets past the end of the source clamp to end-of-input.
    pub fn position(&self, offset: u32) -> SourcePosition {
        let offset = offset.min(self.source_len);
        // partition_point returns the count of line starts <= offset,
        // which is always >= 1 because line_starts[0] == 0.
        let line_index = self.line_starts.partition_point(|&s| s <= offset) - 1;
        let line_start = self.line_starts[line_index];
        #[allow(
            clippy::cast_possible_truncation,
            reason = "line_starts has at most source_len + 1 entries, fits u32"
        )]
        let line = line_index as u32 + 1;
        SourcePosition {
            offset,
            line,
            column: offset - line_start + 1,
        }
    }
}

/// Build the newline index: offset 0 plus the offset after every `\n`.
///
/// Uses `memchr` for SIMD-accelerated newline search instead of
/// byte-at-a-time iteration.
fn build_line_starts(source: &[u8]) -> Vec<u32> {
    let mut starts = vec![0u32];
    for pos in memchr::memchr_iter(b'\n', source) {
        if let Ok(p) = u32::try_from(pos + 1) {
            starts.push(p);
        }
    }
    starts
}

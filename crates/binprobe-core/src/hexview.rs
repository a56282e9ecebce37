//! Hex and ASCII rendering of byte ranges.
//!
//! Each row carries a zero-padded offset, the bytes as uppercase hex, and an
//! ASCII column where anything outside `0x20..=0x7E` shows as `.`:
//!
//! ```text
//! 0x00000000 | 89 50 4E 47 0D 0A 1A 0A 00 00 00 0D 49 48 44 52 | .PNG........IHDR
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::ops::Range;

/// Default number of bytes per rendered row
pub const DEFAULT_BYTES_PER_ROW: usize = 16;

/// Configuration for the hex renderer
#[derive(Debug, Clone)]
pub struct HexViewConfig {
    /// Bytes shown on each row
    pub bytes_per_row: usize,
    /// Emit a column header and separator before the rows
    pub header: bool,
}

impl Default for HexViewConfig {
    fn default() -> Self {
        Self {
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
            header: true,
        }
    }
}

impl HexViewConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bytes per row (clamped to at least 1)
    pub fn bytes_per_row(mut self, n: usize) -> Self {
        self.bytes_per_row = n.max(1);
        self
    }

    /// Sets whether the column header is emitted
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// Renders byte ranges as hex dumps
#[derive(Debug, Clone, Default)]
pub struct HexView {
    config: HexViewConfig,
}

impl HexView {
    /// Creates a renderer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with custom configuration
    pub fn with_config(config: HexViewConfig) -> Self {
        Self { config }
    }

    /// Render `len` bytes starting at `offset`.
    ///
    /// The end is clamped to the buffer, but an `offset` at or past the end
    /// of `data` is rejected.
    pub fn render<'a>(&self, data: &'a [u8], offset: usize, len: usize) -> Result<HexDump<'a>> {
        if offset >= data.len() {
            return Err(Error::offset_out_of_range(offset, data.len()));
        }
        let end = offset.saturating_add(len).min(data.len());
        Ok(self.dump(data, offset..end))
    }

    /// Render an explicit byte range, clamped to the buffer.
    pub fn render_range<'a>(&self, data: &'a [u8], range: Range<usize>) -> Result<HexDump<'a>> {
        if range.end < range.start {
            return Err(Error::invalid_range(range.start, range.end));
        }
        self.render(data, range.start, range.end - range.start)
    }

    fn dump<'a>(&self, data: &'a [u8], range: Range<usize>) -> HexDump<'a> {
        HexDump {
            start: range.start,
            bytes: &data[range],
            bytes_per_row: self.config.bytes_per_row,
            header: self.config.header,
        }
    }
}

/// A validated, renderable byte range
#[derive(Debug, Clone)]
pub struct HexDump<'a> {
    start: usize,
    bytes: &'a [u8],
    bytes_per_row: usize,
    header: bool,
}

impl<'a> HexDump<'a> {
    /// Offset of the first rendered byte
    pub fn start(&self) -> usize {
        self.start
    }

    /// The rendered bytes
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Iterates over the rows of the dump
    pub fn rows(&self) -> impl Iterator<Item = HexRow<'a>> + '_ {
        let width = self.bytes_per_row;
        let start = self.start;
        self.bytes
            .chunks(width)
            .enumerate()
            .map(move |(i, bytes)| HexRow {
                offset: start + i * width,
                bytes,
                width,
            })
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.header {
            let hex_width = self.bytes_per_row * 3;
            writeln!(f, "{:<10} | {:<hex_width$}| ASCII", "Offset", "Hex")?;
            writeln!(
                f,
                "{}+{}+{}",
                "-".repeat(11),
                "-".repeat(hex_width + 1),
                "-".repeat(self.bytes_per_row + 1)
            )?;
        }
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// One row of a hex dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRow<'a> {
    /// Buffer offset of the first byte in the row
    pub offset: usize,
    /// The bytes on this row (shorter than the width only on the last row)
    pub bytes: &'a [u8],
    width: usize,
}

impl fmt::Display for HexRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X} | ", self.offset)?;
        for byte in self.bytes {
            write!(f, "{byte:02X} ")?;
        }
        for _ in self.bytes.len()..self.width {
            f.write_str("   ")?;
        }
        f.write_str("| ")?;
        for &byte in self.bytes {
            let c = if is_ascii_printable(byte) {
                byte as char
            } else {
                '.'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Printable in the ASCII column: `0x20..=0x7E`
#[inline]
pub fn is_ascii_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain() -> HexView {
        HexView::with_config(HexViewConfig::new().header(false))
    }

    #[test]
    fn test_render_two_bytes() {
        let dump = plain().render(b"\x00\x41", 0, 2).unwrap();
        let text = dump.to_string();
        let expected = format!("0x00000000 | 00 41 {}| .A\n", "   ".repeat(14));
        assert_eq!(text, expected);
    }

    #[test]
    fn test_rows_split_at_width() {
        let data: Vec<u8> = (0u8..40).collect();
        let dump = plain().render(&data, 4, 100).unwrap();
        let rows: Vec<_> = dump.rows().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].offset, 4);
        assert_eq!(rows[1].offset, 20);
        assert_eq!(rows[2].offset, 36);
        assert_eq!(rows[2].bytes, &[36, 37, 38, 39]);
    }

    #[test]
    fn test_full_row_has_no_padding() {
        let data = b"ABCDEFGHIJKLMNOP";
        let text = plain().render(data, 0, 16).unwrap().to_string();
        assert_eq!(
            text,
            "0x00000000 | 41 42 43 44 45 46 47 48 49 4A 4B 4C 4D 4E 4F 50 | ABCDEFGHIJKLMNOP\n"
        );
    }

    #[test]
    fn test_header_aligns_with_rows() {
        let text = HexView::new().render(b"hi", 0, 2).unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Offset     | Hex"));
        assert_eq!(lines[0].find("| ASCII"), lines[2].rfind("| "));
        assert_eq!(lines[1].find('+'), lines[2].find('|'));
        assert_eq!(lines[1].rfind('+'), lines[2].rfind('|'));
    }

    #[test]
    fn test_high_bytes_render_as_dots() {
        let text = plain().render(&[0x7F, 0x80, 0xC0, 0x20], 0, 4).unwrap().to_string();
        assert!(text.ends_with("| ... \n"));
    }

    #[test]
    fn test_offset_out_of_range() {
        let err = plain().render(b"abc", 3, 1).unwrap_err();
        assert!(matches!(err, Error::OffsetOutOfRange { offset: 3, len: 3 }));
        assert!(plain().render(&[], 0, 16).is_err());
    }

    #[test]
    fn test_render_range_rejects_reversed() {
        let err = plain().render_range(b"abcdef", 4..2).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start: 4, end: 2 }));
    }

    #[test]
    fn test_render_range_clamps_end() {
        let dump = plain().render_range(b"abcdef", 2..64).unwrap();
        assert_eq!(dump.start(), 2);
        assert_eq!(dump.bytes(), b"cdef");
    }
}

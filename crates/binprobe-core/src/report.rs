//! Extensible report rendering.
//!
//! Analysis passes return owned values; a [`ReportWriter`] decides what to
//! do with them. [`TextReport`] produces the human-readable report and
//! [`SummaryWriter`] only counts findings.

use crate::hexview::{HexDump, HexView};
use crate::pattern::PatternReport;
use crate::search::SearchHit;
use crate::strings::StringReport;
use std::fmt::{self, Result, Write};

/// Trait for consuming report sections.
///
/// Every method has a no-op default, so implementors only override the
/// sections they care about.
pub trait ReportWriter {
    /// Write the size of the analyzed buffer
    fn write_file_size(&mut self, size: usize) -> Result {
        let _ = size;
        Ok(())
    }

    /// Write the primary hex dump
    fn write_dump(&mut self, dump: &HexDump<'_>) -> Result {
        let _ = dump;
        Ok(())
    }

    /// Write the results of a literal search
    fn write_search(&mut self, data: &[u8], needle: &[u8], hits: &[SearchHit]) -> Result {
        let _ = (data, needle, hits);
        Ok(())
    }

    /// Write the repeating-pattern section
    fn write_patterns(&mut self, report: &PatternReport) -> Result {
        let _ = report;
        Ok(())
    }

    /// Write the printable-run section
    fn write_strings(&mut self, report: &StringReport) -> Result {
        let _ = report;
        Ok(())
    }
}

/// A writer that discards all sections
pub struct NullWriter;

impl ReportWriter for NullWriter {}

/// A writer that counts findings per section
#[derive(Debug, Default)]
pub struct SummaryWriter {
    /// Size of the analyzed buffer
    pub size: usize,
    /// Number of search hits
    pub search_hits: usize,
    /// Number of reported pattern groups
    pub patterns: usize,
    /// Number of reported printable runs
    pub strings: usize,
}

impl ReportWriter for SummaryWriter {
    fn write_file_size(&mut self, size: usize) -> Result {
        self.size = size;
        Ok(())
    }

    fn write_search(&mut self, _data: &[u8], _needle: &[u8], hits: &[SearchHit]) -> Result {
        self.search_hits += hits.len();
        Ok(())
    }

    fn write_patterns(&mut self, report: &PatternReport) -> Result {
        self.patterns += report.patterns.len();
        Ok(())
    }

    fn write_strings(&mut self, report: &StringReport) -> Result {
        self.strings += report.runs.len();
        Ok(())
    }
}

impl fmt::Display for SummaryWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result {
        write!(
            f,
            "{} bytes, {} search hit(s), {} pattern group(s), {} text string(s)",
            self.size, self.search_hits, self.patterns, self.strings
        )
    }
}

/// Renders the plain-text report into any [`fmt::Write`] sink
#[derive(Debug)]
pub struct TextReport<W> {
    out: W,
    view: HexView,
}

impl Default for TextReport<String> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<W: Write> TextReport<W> {
    /// Creates a text report writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            view: HexView::new(),
        }
    }

    /// Uses a custom renderer for search context dumps
    pub fn with_view(mut self, view: HexView) -> Self {
        self.view = view;
        self
    }

    /// Consumes the writer, returning the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for TextReport<W> {
    fn write_file_size(&mut self, size: usize) -> Result {
        writeln!(self.out, "File size: {size} bytes")
    }

    fn write_dump(&mut self, dump: &HexDump<'_>) -> Result {
        writeln!(self.out, "\n=== File Dump (Offset: {}) ===", dump.start())?;
        write!(self.out, "{dump}")
    }

    fn write_search(&mut self, data: &[u8], needle: &[u8], hits: &[SearchHit]) -> Result {
        writeln!(
            self.out,
            "\n=== Searching for: {} ===",
            String::from_utf8_lossy(needle)
        )?;

        if hits.is_empty() {
            return writeln!(self.out, "String not found in file");
        }

        for hit in hits {
            writeln!(self.out, "Found at offset: 0x{:X} ({})", hit.offset, hit.offset)?;
            writeln!(self.out, "\nContext:")?;
            // Hits always lie inside the buffer, so the context range is valid.
            if let Ok(dump) = self.view.render_range(data, hit.context.clone()) {
                write!(self.out, "{dump}")?;
            }
        }
        Ok(())
    }

    fn write_patterns(&mut self, report: &PatternReport) -> Result {
        writeln!(self.out, "\n=== Record Structure Analysis ===")?;

        if report.qualifying == 0 {
            return writeln!(self.out, "No obvious repeating patterns found");
        }

        writeln!(self.out, "Potential record delimiters found:")?;
        for pattern in &report.patterns {
            write!(
                self.out,
                "Pattern: 0x{} appears at offsets: {}",
                pattern.group.hex(),
                join(&pattern.examples, |o| format!("0x{o:X}"))
            )?;
            if !pattern.distances.is_empty() {
                write!(
                    self.out,
                    " (Distances: {})",
                    join(&pattern.distances, |d| d.to_string())
                )?;
            }
            writeln!(self.out)?;
        }
        if report.truncated() {
            writeln!(self.out, "... and more patterns")?;
        }
        Ok(())
    }

    fn write_strings(&mut self, report: &StringReport) -> Result {
        writeln!(self.out, "\nPotential text strings found:")?;
        for run in &report.runs {
            writeln!(self.out, "Offset 0x{:X}: {}", run.offset, run.text)?;
        }
        if report.truncated {
            writeln!(self.out, "... and more text strings")?;
        }
        Ok(())
    }
}

fn join(values: &[usize], f: impl Fn(usize) -> String) -> String {
    values
        .iter()
        .map(|&v| f(v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{PatternConfig, PatternDetector};
    use crate::search::SubstringSearcher;
    use crate::strings::StringExtractor;
    use pretty_assertions::assert_eq;

    fn marker_buffer() -> Vec<u8> {
        let mut data = vec![0u8; 40];
        for start in [0, 10, 20, 30] {
            data[start..start + 2].copy_from_slice(&[0xAB, 0xCD]);
        }
        data
    }

    #[test]
    fn test_pattern_section() {
        let detector = PatternDetector::with_config(PatternConfig::new().max_groups(1));
        let report = detector.detect(&marker_buffer());

        let mut text = TextReport::default();
        text.write_patterns(&report).unwrap();
        assert_eq!(
            text.into_inner(),
            "\n=== Record Structure Analysis ===\n\
             Potential record delimiters found:\n\
             Pattern: 0xabcd appears at offsets: 0x0, 0xA, 0x14 (Distances: 10, 10, 10)\n\
             ... and more patterns\n"
        );
    }

    #[test]
    fn test_zero_group_cap_still_notes_patterns() {
        let detector = PatternDetector::with_config(PatternConfig::new().max_groups(0));
        let report = detector.detect(&marker_buffer());
        assert!(report.qualifying > 0);

        let mut text = TextReport::default();
        text.write_patterns(&report).unwrap();
        let out = text.into_inner();
        assert!(!out.contains("No obvious repeating patterns found"));
        assert!(out.ends_with("Potential record delimiters found:\n... and more patterns\n"));
    }

    #[test]
    fn test_empty_pattern_section() {
        let mut text = TextReport::default();
        text.write_patterns(&PatternReport::default()).unwrap();
        assert!(text
            .into_inner()
            .ends_with("No obvious repeating patterns found\n"));
    }

    #[test]
    fn test_search_section() {
        let data = b"\x00\x00PLAYER\x00\x01";
        let hits = SubstringSearcher::new().search(data, b"PLAYER").unwrap();

        let mut text = TextReport::default();
        text.write_search(data, b"PLAYER", &hits).unwrap();
        let out = text.into_inner();

        assert!(out.contains("=== Searching for: PLAYER ==="));
        assert!(out.contains("Found at offset: 0x2 (2)"));
        assert!(out.contains("0x00000000 | 00 00 50 4C 41 59 45 52 00 01"));

        let mut text = TextReport::default();
        text.write_search(data, b"COACH", &[]).unwrap();
        assert!(text.into_inner().ends_with("String not found in file\n"));
    }

    #[test]
    fn test_strings_section() {
        let report = StringExtractor::new().extract(b"\x00Team\x00\xC9cole\x00");

        let mut text = TextReport::default();
        text.write_strings(&report).unwrap();
        assert_eq!(
            text.into_inner(),
            "\nPotential text strings found:\nOffset 0x1: Team\nOffset 0x6: \u{C9}cole\n"
        );
    }

    #[test]
    fn test_summary_writer() {
        let data = marker_buffer();
        let mut summary = SummaryWriter::default();
        summary.write_file_size(data.len()).unwrap();
        summary
            .write_patterns(&PatternDetector::new().detect(&data))
            .unwrap();
        summary
            .write_strings(&StringExtractor::new().extract(&data))
            .unwrap();

        assert_eq!(summary.size, 40);
        assert_eq!(summary.patterns, 5);
        assert_eq!(summary.strings, 0);
        assert!(summary.to_string().starts_with("40 bytes"));
    }

    #[test]
    fn test_null_writer() {
        let mut writer = NullWriter;
        assert!(writer.write_file_size(10).is_ok());
        assert!(writer.write_strings(&StringReport::default()).is_ok());
    }
}

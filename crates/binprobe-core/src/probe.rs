//! Running every analysis pass over one buffer.

use crate::error::{Error, Result};
use crate::hexview::HexView;
use crate::pattern::{PatternConfig, PatternDetector};
use crate::report::ReportWriter;
use crate::search::SubstringSearcher;
use crate::strings::{StringConfig, StringExtractor};
use tracing::{debug, warn};

/// Default number of bytes in the primary dump
pub const DEFAULT_DUMP_LEN: usize = 256;

/// What to show for a single buffer
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Start of the primary dump
    pub dump_offset: usize,
    /// Length of the primary dump
    pub dump_len: usize,
    /// Literal bytes to search for; empty skips the search section
    pub search: Option<Vec<u8>>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            dump_offset: 0,
            dump_len: DEFAULT_DUMP_LEN,
            search: None,
        }
    }
}

impl ProbeOptions {
    /// Creates options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary dump offset
    pub fn dump_offset(mut self, offset: usize) -> Self {
        self.dump_offset = offset;
        self
    }

    /// Sets the primary dump length
    pub fn dump_len(mut self, len: usize) -> Self {
        self.dump_len = len;
        self
    }

    /// Sets the search term
    pub fn search(mut self, needle: impl Into<Vec<u8>>) -> Self {
        self.search = Some(needle.into());
        self
    }
}

/// Sections that were skipped, and why
#[derive(Debug, Default)]
pub struct ProbeOutcome {
    /// Recoverable errors, in the order they occurred
    pub skipped: Vec<Error>,
}

impl ProbeOutcome {
    /// Returns true if every section was produced
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Returns true if the primary dump was skipped for a bad offset
    pub fn offset_out_of_range(&self) -> bool {
        self.skipped
            .iter()
            .any(|e| matches!(e, Error::OffsetOutOfRange { .. }))
    }
}

/// Bundles the analysis components
#[derive(Debug, Clone, Default)]
pub struct Probe {
    view: HexView,
    searcher: SubstringSearcher,
    patterns: PatternDetector,
    strings: StringExtractor,
}

impl Probe {
    /// Creates a probe with default components
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pattern detector configuration
    pub fn pattern_config(mut self, config: PatternConfig) -> Self {
        self.patterns = PatternDetector::with_config(config);
        self
    }

    /// Replaces the string extractor configuration
    pub fn string_config(mut self, config: StringConfig) -> Self {
        self.strings = StringExtractor::with_config(config);
        self
    }

    /// Replaces the hex renderer
    pub fn view(mut self, view: HexView) -> Self {
        self.view = view;
        self
    }

    /// Analyze `data` and hand every section to `writer`.
    ///
    /// A bad dump offset skips only the dump; the remaining sections still
    /// run and the error is returned in the outcome.
    pub fn run<W: ReportWriter + ?Sized>(
        &self,
        data: &[u8],
        options: &ProbeOptions,
        writer: &mut W,
    ) -> Result<ProbeOutcome> {
        let mut outcome = ProbeOutcome::default();

        writer.write_file_size(data.len())?;

        match self.view.render(data, options.dump_offset, options.dump_len) {
            Ok(dump) => writer.write_dump(&dump)?,
            Err(e) if e.is_recoverable() => {
                warn!("Skipping dump: {}", e);
                outcome.skipped.push(e);
            }
            Err(e) => return Err(e),
        }

        if let Some(needle) = options.search.as_deref() {
            match self.searcher.search(data, needle) {
                Ok(hits) => writer.write_search(data, needle, &hits)?,
                Err(Error::EmptyPattern) => debug!("Empty search term, skipping search"),
                Err(e) => return Err(e),
            }
        }

        writer.write_patterns(&self.patterns.detect(data))?;
        writer.write_strings(&self.strings.extract(data))?;

        Ok(outcome)
    }
}

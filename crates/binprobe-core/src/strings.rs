//! Printable-run extraction.
//!
//! A byte counts as printable when it is standard printable ASCII
//! (`0x20..=0x7E`) or in the upper Latin-1 letter range (`0xC0..=0xFF`).
//! Runs are decoded one byte per character, so decoding never fails whatever
//! the file's real text encoding is.

use tracing::{debug, trace};

/// Default minimum run length
pub const DEFAULT_MIN_LENGTH: usize = 4;

/// Default number of runs reported before the scan stops
pub const DEFAULT_MAX_RUNS: usize = 10;

/// Returns true if `byte` can be part of a printable run
#[inline]
pub fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E | 0xC0..=0xFF)
}

/// A maximal span of printable bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringRun {
    /// Offset of the first byte
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// The bytes mapped 1:1 to characters
    pub text: String,
}

impl StringRun {
    fn decode(data: &[u8], offset: usize) -> Self {
        Self {
            offset,
            length: data.len(),
            text: data.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// Result of an extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringReport {
    /// Runs in offset order
    pub runs: Vec<StringRun>,
    /// The run cap was reached, so the rest of the buffer was not examined
    pub truncated: bool,
}

/// Configuration for the string extractor
#[derive(Debug, Clone)]
pub struct StringConfig {
    /// Shortest run that is reported
    pub min_length: usize,
    /// Stop after this many runs (0 = unlimited)
    pub max_runs: usize,
    /// Report a run that is still open at the end of the buffer
    pub flush_trailing: bool,
}

impl Default for StringConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_runs: DEFAULT_MAX_RUNS,
            flush_trailing: true,
        }
    }
}

impl StringConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum run length (clamped to at least 1)
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = len.max(1);
        self
    }

    /// Sets the run cap
    pub fn max_runs(mut self, max: usize) -> Self {
        self.max_runs = max;
        self
    }

    /// Sets whether a run open at end of buffer is reported
    pub fn flush_trailing(mut self, flush: bool) -> Self {
        self.flush_trailing = flush;
        self
    }
}

/// Extracts printable runs from a buffer
#[derive(Debug, Clone, Default)]
pub struct StringExtractor {
    config: StringConfig,
}

impl StringExtractor {
    /// Creates an extractor with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with custom configuration
    pub fn with_config(config: StringConfig) -> Self {
        Self { config }
    }

    /// Lazily iterate over qualifying runs.
    pub fn runs<'a>(&'a self, data: &'a [u8]) -> StringRuns<'a> {
        StringRuns {
            data,
            position: 0,
            emitted: 0,
            config: &self.config,
        }
    }

    /// Collect qualifying runs up to the configured cap.
    pub fn extract(&self, data: &[u8]) -> StringReport {
        let mut iter = self.runs(data);
        let runs: Vec<StringRun> = iter.by_ref().collect();
        let truncated = iter.capped();

        debug!(
            "String extraction complete: {} run(s), scanned {} of {} bytes",
            runs.len(),
            iter.scanned(),
            data.len()
        );

        StringReport { runs, truncated }
    }
}

/// Lazy iterator over printable runs.
///
/// Finite and not restartable. Once the cap is reached it returns `None`
/// without looking at the remaining bytes.
#[derive(Debug, Clone)]
pub struct StringRuns<'a> {
    data: &'a [u8],
    position: usize,
    emitted: usize,
    config: &'a StringConfig,
}

impl StringRuns<'_> {
    /// Number of bytes examined so far
    pub fn scanned(&self) -> usize {
        self.position
    }

    fn capped(&self) -> bool {
        self.config.max_runs > 0 && self.emitted >= self.config.max_runs
    }
}

impl Iterator for StringRuns<'_> {
    type Item = StringRun;

    fn next(&mut self) -> Option<StringRun> {
        if self.capped() {
            return None;
        }

        let data = self.data;
        while self.position < data.len() {
            let Some(start) = data[self.position..]
                .iter()
                .position(|&b| is_printable(b))
                .map(|i| self.position + i)
            else {
                self.position = data.len();
                break;
            };

            let end = data[start..]
                .iter()
                .position(|&b| !is_printable(b))
                .map_or(data.len(), |i| start + i);
            self.position = end;

            if end == data.len() && !self.config.flush_trailing {
                trace!("Dropping run at {:#x} left open at end of buffer", start);
                break;
            }

            if end - start >= self.config.min_length {
                self.emitted += 1;
                return Some(StringRun::decode(&data[start..end], start));
            }
        }

        None
    }
}

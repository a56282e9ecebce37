//! Literal byte-sequence search with context ranges.
//!
//! Matching is exact and case-sensitive. The scan advances one byte at a
//! time, so overlapping occurrences are all reported.

use crate::error::{Error, Result};
use std::ops::Range;
use tracing::debug;

/// Default number of context bytes on each side of a hit
pub const DEFAULT_CONTEXT: usize = 16;

/// A single occurrence of the searched sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Offset of the first matched byte
    pub offset: usize,
    /// Bytes surrounding the match, clamped to the buffer
    pub context: Range<usize>,
}

/// Configuration for the searcher
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Context bytes before and after each hit
    pub context: usize,
    /// Maximum number of hits to return (0 = unlimited)
    pub max_hits: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            context: DEFAULT_CONTEXT,
            max_hits: 0,
        }
    }
}

impl SearchConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the context radius
    pub fn context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    /// Sets the maximum number of hits
    pub fn max_hits(mut self, max: usize) -> Self {
        self.max_hits = max;
        self
    }
}

/// Finds literal byte sequences in a buffer
#[derive(Debug, Clone, Default)]
pub struct SubstringSearcher {
    config: SearchConfig,
}

impl SubstringSearcher {
    /// Creates a searcher with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a searcher with custom configuration
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Every start offset of `needle` in `data`, in ascending order.
    ///
    /// An empty needle matches nothing.
    pub fn find_all(&self, data: &[u8], needle: &[u8]) -> Vec<usize> {
        if needle.is_empty() {
            return Vec::new();
        }
        let limit = match self.config.max_hits {
            0 => usize::MAX,
            n => n,
        };
        data.windows(needle.len())
            .enumerate()
            .filter_map(|(i, window)| (window == needle).then_some(i))
            .take(limit)
            .collect()
    }

    /// Search for `needle`, attaching a clamped context range to each hit.
    pub fn search(&self, data: &[u8], needle: &[u8]) -> Result<Vec<SearchHit>> {
        if needle.is_empty() {
            return Err(Error::EmptyPattern);
        }

        let hits: Vec<SearchHit> = self
            .find_all(data, needle)
            .into_iter()
            .map(|offset| SearchHit {
                offset,
                context: self.context_range(data.len(), offset, needle.len()),
            })
            .collect();

        debug!("Found {} occurrence(s) of {} byte pattern", hits.len(), needle.len());
        Ok(hits)
    }

    fn context_range(&self, data_len: usize, offset: usize, needle_len: usize) -> Range<usize> {
        let start = offset.saturating_sub(self.config.context);
        let end = offset
            .saturating_add(needle_len)
            .saturating_add(self.config.context)
            .min(data_len);
        start..end
    }
}

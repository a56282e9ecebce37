//! Repeating byte-pattern detection.
//!
//! Record-oriented formats tend to repeat short markers (tags, padding,
//! length fields) at fixed strides. This module looks for those markers to
//! suggest where record boundaries might be.
//!
//! ## Algorithm Overview
//!
//! For each pattern size (2, 4 and 8 bytes by default):
//!
//! 1. Take every anchor offset `i` with `i < len - 2 * size`
//! 2. Look for the first non-overlapping repeat of `data[i..i + size]` that
//!    starts before `i + lookahead`
//! 3. Record the anchor and repeat in the pattern's group; later repeats are
//!    appended only when they move past the group's last offset
//!
//! Groups with enough occurrences are ordered by first offset, so the report
//! is the same on every run over the same input.
//!
//! The lookahead cap bounds the cost to roughly `len * lookahead` comparisons
//! per size. Repeats further apart than the cap are missed, and stopping at
//! the first match per anchor may under-count dense patterns. The output is a
//! hint for a human, not an exact count.

mod group;

use std::collections::HashMap;
use tracing::{debug, trace};

pub use group::PatternGroup;

/// Pattern sizes scanned by default
pub const DEFAULT_SIZES: [usize; 3] = [2, 4, 8];

/// Default lookahead window in bytes
pub const DEFAULT_LOOKAHEAD: usize = 1000;

/// A reported group with its example offsets and distances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedPattern {
    /// The underlying occurrence group
    pub group: PatternGroup,
    /// The first few occurrence offsets
    pub examples: Vec<usize>,
    /// The first few distances between consecutive occurrences
    pub distances: Vec<usize>,
}

impl ReportedPattern {
    fn new(group: PatternGroup, limit: usize) -> Self {
        let examples = group.offsets().iter().copied().take(limit).collect();
        let mut distances = group.distances();
        distances.truncate(limit);
        Self {
            group,
            examples,
            distances,
        }
    }
}

/// Result of a pattern detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternReport {
    /// Reported groups, ordered by first occurrence
    pub patterns: Vec<ReportedPattern>,
    /// Number of groups that met the occurrence threshold
    pub qualifying: usize,
}

impl PatternReport {
    /// Returns true if no group met the threshold
    pub fn is_empty(&self) -> bool {
        self.qualifying == 0
    }

    /// Returns true if qualifying groups were left out of the report
    pub fn truncated(&self) -> bool {
        self.qualifying > self.patterns.len()
    }
}

/// Configuration for the pattern detector
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Pattern lengths to scan, in scan order
    pub sizes: Vec<usize>,
    /// How far past an anchor a repeat may start
    pub lookahead: usize,
    /// Occurrences needed before a group is reported
    pub min_occurrences: usize,
    /// Maximum number of groups to report
    pub max_groups: usize,
    /// Example offsets and distances kept per reported group
    pub examples: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            lookahead: DEFAULT_LOOKAHEAD,
            min_occurrences: 3,
            max_groups: 5,
            examples: 3,
        }
    }
}

impl PatternConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pattern sizes to scan (zero sizes are dropped)
    pub fn sizes(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.sizes = sizes.into_iter().filter(|&s| s > 0).collect();
        self
    }

    /// Sets the lookahead window
    pub fn lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Sets the reporting threshold
    pub fn min_occurrences(mut self, min: usize) -> Self {
        self.min_occurrences = min;
        self
    }

    /// Sets the maximum number of reported groups
    pub fn max_groups(mut self, max: usize) -> Self {
        self.max_groups = max;
        self
    }

    /// Sets how many example offsets and distances are kept
    pub fn examples(mut self, n: usize) -> Self {
        self.examples = n;
        self
    }
}

/// Detects short byte sequences that repeat within a bounded window
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    config: PatternConfig,
}

impl PatternDetector {
    /// Creates a detector with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector with custom configuration
    pub fn with_config(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Run one detection pass over `data`.
    pub fn detect(&self, data: &[u8]) -> PatternReport {
        debug!("Starting pattern detection over {} bytes", data.len());

        // Insertion-ordered grouping: the map only indexes into `groups`.
        let mut groups: Vec<PatternGroup> = Vec::new();
        let mut index: HashMap<&[u8], usize> = HashMap::new();

        for &size in &self.config.sizes {
            self.scan_size(data, size, &mut groups, &mut index);
        }

        let mut qualifying: Vec<PatternGroup> = groups
            .into_iter()
            .filter(|g| g.occurrences() >= self.config.min_occurrences)
            .collect();
        // Stable: equal first offsets keep scan order.
        qualifying.sort_by_key(PatternGroup::first_offset);

        let total = qualifying.len();
        let patterns: Vec<ReportedPattern> = qualifying
            .into_iter()
            .take(self.config.max_groups)
            .map(|g| ReportedPattern::new(g, self.config.examples))
            .collect();

        debug!(
            "Pattern detection complete: {} qualifying group(s), {} reported",
            total,
            patterns.len()
        );

        PatternReport {
            patterns,
            qualifying: total,
        }
    }

    fn scan_size<'a>(
        &self,
        data: &'a [u8],
        size: usize,
        groups: &mut Vec<PatternGroup>,
        index: &mut HashMap<&'a [u8], usize>,
    ) {
        if size == 0 {
            return;
        }
        let Some(anchor_end) = data.len().checked_sub(2 * size) else {
            trace!("Buffer too small for {}-byte patterns", size);
            return;
        };
        let window_end = data.len() - size + 1;

        for i in 0..anchor_end {
            let pattern = &data[i..i + size];
            let upper = i.saturating_add(self.config.lookahead).min(window_end);

            let Some(j) = (i + size..upper).find(|&j| &data[j..j + size] == pattern) else {
                continue;
            };

            match index.get(pattern) {
                Some(&slot) => {
                    groups[slot].push(j);
                }
                None => {
                    trace!("New {}-byte group at {:#x} (repeat at {:#x})", size, i, j);
                    index.insert(pattern, groups.len());
                    groups.push(PatternGroup::new(pattern.to_vec(), i, j));
                }
            }
        }
    }
}

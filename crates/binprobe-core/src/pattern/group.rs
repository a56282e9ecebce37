//! Occurrence groups for repeating byte sequences.

use std::fmt::Write as FmtWrite;

/// A distinct byte sequence and the offsets where it recurred.
///
/// Offsets are strictly increasing. A group is created from its first pair
/// of occurrences, so it always holds at least two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup {
    pattern: Vec<u8>,
    offsets: Vec<usize>,
}

impl PatternGroup {
    /// Creates a group from an anchor offset and its first repeat
    pub(crate) fn new(pattern: Vec<u8>, first: usize, second: usize) -> Self {
        debug_assert!(first < second);
        Self {
            pattern,
            offsets: vec![first, second],
        }
    }

    /// Records a further occurrence.
    ///
    /// Offsets at or before the last recorded one are ignored; overlapping
    /// anchor scans rediscover occurrences already in the group. Returns
    /// whether the offset was appended.
    pub(crate) fn push(&mut self, offset: usize) -> bool {
        match self.offsets.last() {
            Some(&last) if offset <= last => false,
            _ => {
                self.offsets.push(offset);
                true
            }
        }
    }

    /// The repeating bytes
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Start offsets in ascending order
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of recorded occurrences
    pub fn occurrences(&self) -> usize {
        self.offsets.len()
    }

    /// Offset of the earliest occurrence
    pub fn first_offset(&self) -> usize {
        self.offsets[0]
    }

    /// Differences between consecutive offsets
    pub fn distances(&self) -> Vec<usize> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Lowercase hex encoding of the pattern bytes
    pub fn hex(&self) -> String {
        let mut out = String::with_capacity(self.pattern.len() * 2);
        for byte in &self.pattern {
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

//! Error types for the binprobe-core library.
//!
//! Every analysis pass is a pure computation over a resident buffer, so the
//! failure surface is small: loading the input and validating offsets.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for binprobe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all binprobe operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Requested offset lies at or beyond the end of the buffer
    #[error("offset {offset:#x} is beyond buffer size ({len} bytes)")]
    OffsetOutOfRange {
        /// The rejected offset
        offset: usize,
        /// Length of the buffer
        len: usize,
    },

    /// Range whose end precedes its start
    #[error("invalid range {start:#x}..{end:#x}: end precedes start")]
    InvalidRange {
        /// Range start
        start: usize,
        /// Range end
        end: usize,
    },

    /// Search pattern with no bytes
    #[error("search pattern is empty")]
    EmptyPattern,

    /// Failed to render a report section
    #[error("failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new out-of-range error
    pub fn offset_out_of_range(offset: usize, len: usize) -> Self {
        Self::OffsetOutOfRange { offset, len }
    }

    /// Creates a new invalid range error
    pub fn invalid_range(start: usize, end: usize) -> Self {
        Self::InvalidRange { start, end }
    }

    /// Returns true if the error only skips one report section
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::OffsetOutOfRange { .. } | Self::InvalidRange { .. } | Self::EmptyPattern
        )
    }
}

//! # binprobe-core
//!
//! Heuristic structure inference for undocumented binary formats.
//!
//! Given an arbitrary byte buffer, this crate can:
//! - Render hex/ASCII views of byte ranges
//! - Locate literal byte sequences with surrounding context
//! - Detect short byte patterns that repeat at regular distances
//! - Extract runs of printable text
//!
//! Results are hints for a human analyst, not a decoder.
//!
//! ## Architecture
//!
//! - [`source`]: Loading files into an immutable [`Buffer`]
//! - [`hexview`]: Hex/ASCII rendering
//! - [`search`]: Literal substring search
//! - [`pattern`]: Repeating-pattern detection
//! - [`strings`]: Printable-run extraction
//! - [`report`]: Report rendering
//! - [`probe`]: Running every pass over one buffer
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use binprobe_core::{load_file, PatternDetector, StringExtractor};
//!
//! let data = load_file("./players.fdi")?;
//!
//! for pattern in PatternDetector::new().detect(&data).patterns {
//!     println!("0x{} every {:?} bytes", pattern.group.hex(), pattern.distances);
//! }
//!
//! for run in StringExtractor::new().runs(&data) {
//!     println!("{:#x}: {}", run.offset, run.text);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! Every pass returns an owned report. Implement [`ReportWriter`] to render
//! those reports differently.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod hexview;
pub mod pattern;
pub mod probe;
pub mod report;
pub mod search;
pub mod source;
pub mod strings;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use hexview::{HexDump, HexRow, HexView, HexViewConfig};
pub use pattern::{PatternConfig, PatternDetector, PatternGroup, PatternReport, ReportedPattern};
pub use probe::{Probe, ProbeOptions, ProbeOutcome};
pub use report::{NullWriter, ReportWriter, SummaryWriter, TextReport};
pub use search::{SearchConfig, SearchHit, SubstringSearcher};
pub use source::{load_file, Buffer};
pub use strings::{StringConfig, StringExtractor, StringReport, StringRun, StringRuns};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

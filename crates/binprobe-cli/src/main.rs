//! binprobe - Probe unknown binary formats for structural clues
//!
//! This tool dumps a file as hex and ASCII, searches it for literal text, and
//! reports repeating byte patterns and printable strings that hint at record
//! boundaries.

use anyhow::{bail, Context, Result};
use binprobe_core::{
    load_file, PatternConfig, Probe, ProbeOptions, StringConfig, SummaryWriter, TextReport,
};
use clap::{Args, Parser};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Exit code for a missing or unreadable input
const EXIT_UNREADABLE: u8 = 2;

/// Exit code for a dump offset past the end of the input
const EXIT_OFFSET_OUT_OF_RANGE: u8 = 3;

/// Probe unknown binary formats for record boundaries and embedded text
#[derive(Parser, Debug)]
#[command(name = "binprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Number of bytes to dump
    #[arg(short, long, default_value_t = 256)]
    bytes: usize,

    /// Starting offset for the dump (decimal, or hex with 0x prefix)
    #[arg(short, long, default_value = "0", value_parser = parse_offset)]
    offset: usize,

    /// Search for text (case sensitive)
    #[arg(short, long)]
    search: Option<String>,

    /// How far ahead of each anchor a repeat may start
    #[arg(long, env = "BINPROBE_LOOKAHEAD", default_value_t = 1000)]
    lookahead: usize,

    /// Maximum number of repeating patterns to report
    #[arg(long, env = "BINPROBE_MAX_PATTERNS", default_value_t = 5)]
    max_patterns: usize,

    /// Shortest printable run to report
    #[arg(long, env = "BINPROBE_MIN_STRING_LENGTH", default_value_t = 4)]
    min_string_length: usize,

    /// Maximum number of printable runs to report (0 = unlimited)
    #[arg(long, env = "BINPROBE_MAX_STRINGS", default_value_t = 10)]
    max_strings: usize,

    /// Drop a printable run that is still open at end of file
    #[arg(long)]
    no_trailing_flush: bool,

    /// Print one line of counts per file instead of the full report
    #[arg(long)]
    summary: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single file to analyze
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of files to analyze
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

impl Cli {
    fn probe(&self) -> Probe {
        Probe::new()
            .pattern_config(
                PatternConfig::new()
                    .lookahead(self.lookahead)
                    .max_groups(self.max_patterns),
            )
            .string_config(
                StringConfig::new()
                    .min_length(self.min_string_length)
                    .max_runs(self.max_strings)
                    .flush_trailing(!self.no_trailing_flush),
            )
    }

    fn probe_options(&self) -> ProbeOptions {
        let options = ProbeOptions::new()
            .dump_offset(self.offset)
            .dump_len(self.bytes);
        match &self.search {
            Some(term) => options.search(term.as_bytes()),
            None => options,
        }
    }
}

/// How a run finished, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Status {
    Ok,
    OffsetOutOfRange,
    Unreadable,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => ExitCode::SUCCESS,
            Status::OffsetOutOfRange => ExitCode::from(EXIT_OFFSET_OUT_OF_RANGE),
            Status::Unreadable => ExitCode::from(EXIT_UNREADABLE),
        }
    }
}

/// Parse an offset given in decimal or as `0x`-prefixed hex
fn parse_offset(s: &str) -> std::result::Result<usize, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid offset '{s}': {e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Dispatch based on input mode
    let result = if let Some(ref file) = cli.input.file {
        process_single_file(&cli, file)
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, directory)
    } else {
        Err(anyhow::anyhow!("Either --file or --directory must be specified"))
    };

    match result {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_UNREADABLE)
        }
    }
}

/// Process a single file
fn process_single_file(cli: &Cli, file: &Path) -> Result<Status> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    process_file(cli, file)
}

/// Process a directory of files recursively
fn process_directory(cli: &Cli, directory: &Path) -> Result<Status> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    let mut status = Status::Ok;
    let mut files_processed = 0;

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error walking {}: {}", directory.display(), e);
                status = status.max(Status::Unreadable);
                continue;
            }
        };
        let path = entry.path();

        // A dangling link is an input we were asked to read but cannot
        let dangling = entry.path_is_symlink() && fs::metadata(path).is_err();
        if !path.is_file() && !dangling {
            continue;
        }

        // Skip hidden files
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
        {
            trace!("Skipping hidden file: {}", path.display());
            continue;
        }

        if !cli.summary {
            println!("==> {} <==", path.display());
        }

        match process_file(cli, path) {
            Ok(file_status) => status = status.max(file_status),
            // Log error but continue with other files
            Err(e) => {
                warn!("Error processing {}: {}", path.display(), e);
                status = status.max(Status::Unreadable);
            }
        }
        files_processed += 1;

        if !cli.summary {
            println!();
        }
    }

    info!("Processed {} files", files_processed);
    Ok(status)
}

/// Analyze one file and print its report
fn process_file(cli: &Cli, path: &Path) -> Result<Status> {
    trace!("Reading {}", path.display());
    let data = load_file(path)?;

    let probe = cli.probe();
    let options = cli.probe_options();

    let outcome = if cli.summary {
        let mut summary = SummaryWriter::default();
        let outcome = probe
            .run(&data, &options, &mut summary)
            .with_context(|| format!("Failed to analyze {}", path.display()))?;
        println!("{}: {}", path.display(), summary);
        outcome
    } else {
        let mut report = TextReport::default();
        let outcome = probe
            .run(&data, &options, &mut report)
            .with_context(|| format!("Failed to analyze {}", path.display()))?;
        print!("{}", report.into_inner());
        outcome
    };

    for skipped in &outcome.skipped {
        eprintln!("{}: {}", path.display(), skipped);
    }

    debug!("Finished {} ({} bytes)", path.display(), data.len());

    if outcome.offset_out_of_range() {
        Ok(Status::OffsetOutOfRange)
    } else {
        Ok(Status::Ok)
    }
}

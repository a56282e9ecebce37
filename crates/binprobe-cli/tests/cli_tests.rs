//! CLI integration tests for binprobe.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn binprobe_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_binprobe"));
    for var in [
        "BINPROBE_LOOKAHEAD",
        "BINPROBE_MAX_PATTERNS",
        "BINPROBE_MIN_STRING_LENGTH",
        "BINPROBE_MAX_STRINGS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn run(args: &[&str]) -> Output {
    binprobe_cmd()
        .args(args)
        .output()
        .expect("Failed to execute binprobe")
}

/// Four 16-byte records, each starting with a two-byte tag
fn write_records(dir: &Path, name: &str) -> String {
    let mut data = Vec::new();
    for id in 0..4u8 {
        data.extend_from_slice(&[0xFE, 0xED, id, 0x00]);
        data.extend_from_slice(b"Striker");
        data.push(b'A' + id);
        data.extend_from_slice(&[0x00; 4]);
    }
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("binprobe"));
    assert!(stdout.contains("--search"));
    assert!(stdout.contains("--offset"));
}

#[test]
fn test_cli_full_report() {
    let dir = TempDir::new().unwrap();
    let file = write_records(dir.path(), "squad.fdi");

    let output = run(&["--file", &file, "--search", "StrikerC"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("File size: 64 bytes\n"));
    assert!(stdout.contains("=== File Dump (Offset: 0) ==="));
    assert!(stdout.contains("0x00000000 | FE ED 00 00 53 74 72 69 6B 65 72 41 00 00 00 00 |"));
    assert!(stdout.contains("Found at offset: 0x24 (36)"));
    assert!(stdout.contains("Pattern: 0xfeed appears at offsets: 0x0, 0x10, 0x20 (Distances: 16, 16, 16)"));
    assert!(stdout.contains("Offset 0x4: StrikerA"));
}

#[test]
fn test_cli_search_not_found() {
    let dir = TempDir::new().unwrap();
    let file = write_records(dir.path(), "squad.fdi");

    let output = run(&["-f", &file, "-s", "Goalkeeper"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("String not found in file"));
}

#[test]
fn test_cli_hex_offset_and_length() {
    let dir = TempDir::new().unwrap();
    let file = write_records(dir.path(), "squad.fdi");

    let output = run(&["-f", &file, "--offset", "0x10", "--bytes", "4"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== File Dump (Offset: 16) ==="));
    assert!(stdout.contains("0x00000010 | FE ED 01 00 "));
    assert!(!stdout.contains("0x00000020 |"));
}

#[test]
fn test_cli_offset_out_of_range() {
    let dir = TempDir::new().unwrap();
    let file = write_records(dir.path(), "squad.fdi");

    let output = run(&["-f", &file, "--offset", "64"]);
    assert_eq!(output.status.code(), Some(3));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains("=== File Dump"));
    assert!(stdout.contains("=== Record Structure Analysis ==="));
    assert!(stderr.contains("beyond buffer size"));
}

#[test]
fn test_cli_nonexistent_file() {
    let output = run(&["--file", "/nonexistent/file/path.fdi"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_cli_directory_summary() {
    let dir = TempDir::new().unwrap();
    write_records(dir.path(), "a.fdi");
    write_records(dir.path(), "b.fdi");
    fs::write(dir.path().join(".hidden"), b"ignored").unwrap();

    let output = run(&[
        "--directory",
        &dir.path().to_string_lossy(),
        "--summary",
        "--search",
        "Striker",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("a.fdi: 64 bytes, 4 search hit(s)"));
    assert!(lines[1].contains("b.fdi"));
}

#[test]
fn test_cli_string_cap_flag() {
    let dir = TempDir::new().unwrap();
    let file = write_records(dir.path(), "squad.fdi");

    let output = run(&["-f", &file, "--max-strings", "1"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Offset 0x4: StrikerA"));
    assert!(!stdout.contains("Offset 0x14: StrikerB"));
    assert!(stdout.contains("... and more text strings"));
}

#[cfg(unix)]
#[test]
fn test_cli_directory_unreadable_entry() {
    let dir = TempDir::new().unwrap();
    write_records(dir.path(), "ok.fdi");
    std::os::unix::fs::symlink(dir.path().join("gone.fdi"), dir.path().join("missing.fdi"))
        .unwrap();

    let output = run(&["-d", &dir.path().to_string_lossy(), "--summary"]);
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("ok.fdi: 64 bytes"));
    assert!(stderr.contains("missing.fdi"));
    assert_eq!(stderr.matches("failed to read file").count(), 1);
}

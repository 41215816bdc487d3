//! CLI integration tests.
//!
//! Tests the command-line interface by running the binary as a subprocess.

mod common;

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use common::{create_temp_file, BOOKS_JSON, BOOKS_JSONL};

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cite-format"))
}

/// Run the binary with `input` piped to stdin.
fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = cli()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    // The binary may exit before reading stdin (e.g. on a bad --style), so a
    // broken pipe here is not a test failure.
    let mut stdin = child.stdin.take().unwrap();
    let _ = stdin.write_all(input.as_bytes());
    drop(stdin);

    child.wait_with_output().expect("Failed to wait on command")
}

// ============================================
// Tests for CLI argument parsing
// ============================================

#[test]
fn test_cli_help() {
    let output = cli().arg("--help").output().expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("cite-format") || stdout.contains("citations"),
        "Help should mention the tool name or purpose: {}",
        stdout
    );
    assert!(output.status.success(), "Help should exit with success");
}

#[test]
fn test_cli_format_missing_input() {
    let output = cli().arg("format").output().expect("Failed to execute command");

    assert!(!output.status.success(), "format without input should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INPUT"), "Should name the missing argument: {}", stderr);
}

#[test]
fn test_cli_styles() {
    let output = cli().arg("styles").output().expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "APA\nMLA\nChicago\nHarvard\n"
    );
}

// ============================================
// Tests for the format command
// ============================================

#[test]
fn test_cli_format_all_styles() {
    // Given: a JSON file with two records
    let file = create_temp_file(BOOKS_JSON, ".json");

    // When: we format it with default options
    let output = cli()
        .args(["format", file.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    // Then: every style of every record is printed
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  APA: Sanusi, A. (2020). Fiqh Dasar. An-Nur Press."));
    assert!(stdout.contains("  MLA: Sanusi, Ahmad. Fiqh Dasar. An-Nur Press, 2020."));
    assert!(stdout.contains("  Chicago: Ahmad Sanusi, Fiqh Dasar (An-Nur Press, 2020)."));
    assert!(stdout.contains("  Harvard: Sanusi, A. (2020) Fiqh Dasar. An-Nur Press."));
    assert!(stdout.contains("Kitab Kuning\n  APA: (n.d.). Kitab Kuning."));
}

#[test]
fn test_cli_format_stdin_jsonl_with_style_and_record() {
    // Given: JSONL piped on stdin
    let output = run_with_stdin(
        &["format", "-", "--style", "harvard", "--record", "2"],
        BOOKS_JSONL,
    );

    // Then: only the second record in Harvard style is printed
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Kitab Kuning\n  Harvard: (n.d.) Kitab Kuning.\n"
    );
}

#[test]
fn test_cli_format_json_output() {
    let file = create_temp_file(BOOKS_JSON, ".json");

    let output = cli()
        .args(["format", file.path().to_str().unwrap(), "--json", "-s", "mla"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["title"], "Fiqh Dasar");
    assert_eq!(
        parsed[0]["citations"]["MLA"],
        "Sanusi, Ahmad. Fiqh Dasar. An-Nur Press, 2020."
    );
    assert!(parsed[0]["citations"].get("APA").is_none());
}

#[test]
fn test_cli_format_output_file() {
    let file = create_temp_file(BOOKS_JSON, ".json");
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("citations.txt");

    let output = cli()
        .args([
            "format",
            file.path().to_str().unwrap(),
            "-o",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.starts_with("Fiqh Dasar\n"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("formatted 2 record(s)"), "stderr: {}", stderr);
}

#[test]
fn test_cli_format_empty_input_prints_nothing() {
    let output = run_with_stdin(&["format", "-"], "");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

// ============================================
// Tests for exit codes
// ============================================

#[test]
fn test_cli_missing_file_exit_code() {
    let output = cli()
        .args(["format", "/nonexistent/books.json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(10));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hint: verify the file path"), "stderr: {}", stderr);
}

#[test]
fn test_cli_invalid_records_exit_code() {
    let output = run_with_stdin(&["format", "-"], r#"[{"author": "No Title"}]"#);

    assert_eq!(output.status.code(), Some(11));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("title"), "stderr: {}", stderr);
}

#[test]
fn test_cli_unknown_style_exit_code() {
    let file = create_temp_file(BOOKS_JSON, ".json");

    let output = cli()
        .args(["format", file.path().to_str().unwrap(), "--style", "ieee"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(12));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown citation style: 'ieee'"), "stderr: {}", stderr);
    assert!(stderr.contains("available styles: APA, MLA, Chicago, Harvard"));
}

#[test]
fn test_cli_record_out_of_range_exit_code() {
    let output = run_with_stdin(&["format", "-", "--record", "3"], BOOKS_JSON);

    assert_eq!(output.status.code(), Some(13));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("record 3 requested but the input holds 2 record(s)"));
}

#[test]
fn test_cli_record_zero_is_out_of_range() {
    let output = run_with_stdin(&["format", "-", "--record", "0"], BOOKS_JSON);
    assert_eq!(output.status.code(), Some(13));
}

// ============================================
// Tests for the copy command
// ============================================

#[test]
fn test_cli_copy_help_mentions_x11_lifetime() {
    let output = cli()
        .args(["copy", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("On X11"), "Copy help should warn about X11: {}", stdout);
    assert!(stdout.contains("clipboard manager"), "help: {}", stdout);
}

#[test]
fn test_cli_copy_unknown_style() {
    let output = run_with_stdin(&["copy", "-", "--style", "vancouver"], BOOKS_JSON);
    assert_eq!(output.status.code(), Some(12));
}

#[test]
fn test_cli_copy_requires_style() {
    let output = run_with_stdin(&["copy", "-"], BOOKS_JSON);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2), "clap usage errors exit with 2");
}

#[test]
fn test_cli_copy_empty_input() {
    let output = run_with_stdin(&["copy", "-", "--style", "apa"], "");
    assert_eq!(output.status.code(), Some(13));
}

#[test]
fn test_cli_copy_reports_outcome() {
    // The clipboard may or may not be reachable where tests run; either way the
    // command must end with a notification, not a crash.
    let output = run_with_stdin(&["copy", "-", "--style", "apa"], BOOKS_JSON);
    let stderr = String::from_utf8_lossy(&output.stderr);

    match output.status.code() {
        Some(0) => {
            assert!(stderr.contains("Sitasi APA berhasil disalin"), "stderr: {}", stderr);
            assert_eq!(
                String::from_utf8_lossy(&output.stdout),
                "Sanusi, A. (2020). Fiqh Dasar. An-Nur Press.\n"
            );
        }
        Some(14) => assert!(stderr.contains("Gagal menyalin sitasi"), "stderr: {}", stderr),
        other => panic!("unexpected exit code {:?}, stderr: {}", other, stderr),
    }
}

// Integration tests for the qtest driver binary
// Runs command scripts end to end and checks output and exit codes

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Run qtest on `script` with an empty config so local config files don't interfere
fn run_qtest(script: &str, extra_args: &[&str]) -> Output {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = dir.path().join("empty.toml");
    let script_path = dir.path().join("trace.cmd");
    fs::write(&config_path, "").unwrap();
    fs::write(&script_path, script).unwrap();

    Command::new(env!("CARGO_BIN_EXE_qtest"))
        .arg("--config-file")
        .arg(&config_path)
        .arg("--file")
        .arg(&script_path)
        .arg("--no-color")
        .args(extra_args)
        .output()
        .expect("Failed to execute qtest")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_fifo_and_lifo_trace() {
    let output = run_qtest(
        "# FIFO then LIFO\nnew\nit a\nit b\nit c\nrh a\nrh b\nrh c\nih a\nih b\nih c\nrh c\nrh b\nrh a\nfree\n",
        &[],
    );
    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {}", out);
    assert!(out.contains("q = [a b c]"));
    assert!(out.contains("q = [c b a]"));
    assert!(!out.contains("ERROR"));
}

#[test]
fn test_sort_reverse_trace() {
    let output = run_qtest(
        "new\nit banana\nit apple\nit cherry\nsort\nreverse\nrh cherry\nrh banana\nrh apple\nsize\n",
        &[],
    );
    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {}", out);
    assert!(out.contains("q = [apple banana cherry]"));
    assert!(out.contains("q = [cherry banana apple]"));
    assert!(out.contains("Queue size = 0"));
}

#[test]
fn test_failed_check_sets_exit_code() {
    let output = run_qtest("new\nit gerbil\nrh hamster\n", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("ERROR: Removed value gerbil != expected value hamster"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 errors in"));
}

#[test]
fn test_memory_limit_refuses_insertions() {
    let output = run_qtest("new\nit x 1000\nsize\nfree\n", &["--memory-limit", "1K"]);
    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {}", out);
    assert!(out.contains("Warning: Insertion of x failed"));
    assert!(!out.contains("Queue size = 1000"));
}

#[test]
fn test_fail_interval_keeps_queue_consistent() {
    let output = run_qtest(
        "new\nit a\nit b\nit c\nit d\nit e\nsort\nreverse\nfree\n",
        &["--fail-interval", "4"],
    );
    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {}", out);
    assert!(out.contains("Warning: Insertion of"));
}

#[test]
fn test_truncation_option() {
    let output = run_qtest("new\noption length 5\nit hippopotamus\nrh hipp\n", &[]);
    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {}", out);
    assert!(out.contains("Removed hipp from queue"));
}

#[test]
fn test_commands_from_stdin_with_echo() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("empty.toml");
    fs::write(&config_path, "").unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_qtest"))
        .arg("--config-file")
        .arg(&config_path)
        .arg("--echo")
        .arg("--no-color")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn qtest");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"new\nih dolphin\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {}", out);
    assert!(out.contains("cmd> ih dolphin"));
    assert!(out.contains("q = [dolphin]"));
}

#[test]
fn test_missing_script_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_qtest"))
        .args(["--file", "/definitely/does/not/exist.cmd"])
        .output()
        .expect("Failed to execute qtest");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open command file"));
}

#[test]
fn test_conflicting_log_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_qtest"))
        .args(["--verbose", "--quiet"])
        .output()
        .expect("Failed to execute qtest");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_help_lists_options() {
    let output = Command::new(env!("CARGO_BIN_EXE_qtest"))
        .arg("--help")
        .output()
        .expect("Failed to execute qtest");
    let out = stdout(&output);
    assert!(out.contains("--memory-limit") && out.contains("--fail-interval"));
}

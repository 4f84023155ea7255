//! Integration tests for the `campus` binary.
//!
//! These validate argument parsing, help output, completions, and the
//! error paths reachable without a live backend.
#![allow(clippy::unwrap_used)]

use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `campus` binary with env isolation.
///
/// Clears all `CAMPUS_*` env vars and points home/session directories at
/// throwaway paths so tests never touch real configuration.
fn campus_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("campus").unwrap();
    cmd.env("HOME", "/tmp/campus-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/campus-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/campus-cli-test-nonexistent")
        .env("CAMPUS_SESSION_DIR", "/tmp/campus-cli-test-nonexistent/session")
        .env_remove("CAMPUS_SERVER")
        .env_remove("CAMPUS_OUTPUT")
        .env_remove("CAMPUS_TIMEOUT")
        .env_remove("CAMPUS_PASSWORD");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = campus_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected usage exit code");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    campus_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("student")
            .and(predicate::str::contains("course"))
            .and(predicate::str::contains("enroll"))
            .and(predicate::str::contains("ws-test")),
    );
}

#[test]
fn test_version_flag() {
    campus_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("campus"));
}

#[test]
fn test_unknown_subcommand_fails() {
    campus_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_subcommand_help() {
    campus_cmd()
        .args(["student", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list").and(predicate::str::contains("delete")));
}

// ── Completions ─────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    campus_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("campus"));
}

#[test]
fn test_completions_rejects_unknown_shell() {
    campus_cmd()
        .args(["completions", "4dos"])
        .assert()
        .failure()
        .code(2);
}

// ── Error paths without a backend ───────────────────────────────────

#[test]
fn test_missing_server_is_reported() {
    let output = campus_cmd().arg("whoami").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("No backend server configured"),
        "expected server hint in output:\n{text}"
    );
}

#[test]
fn test_whoami_without_session_requires_login() {
    let output = campus_cmd()
        .args(["--server", "http://127.0.0.1:9", "whoami"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("Not signed in"),
        "expected login hint in output:\n{text}"
    );
}

#[test]
fn test_invalid_server_url_is_rejected() {
    let output = campus_cmd()
        .args(["--server", "not a url", "whoami"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("Invalid value for server"),
        "expected validation error in output:\n{text}"
    );
}

#[test]
fn test_ws_test_without_session_requires_token() {
    let output = campus_cmd()
        .args(["--server", "http://127.0.0.1:9", "ws-test"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "expected auth exit code");
}

#[test]
fn test_delete_requires_confirmation_flag_when_not_a_tty() {
    // stdin is not a terminal here, so without --yes the prompt fails fast
    let output = campus_cmd()
        .args(["--server", "http://127.0.0.1:9", "student", "delete", "1"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_ne!(output.status.code(), Some(0));
}

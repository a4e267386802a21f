//! Integration tests for the `tenra` CLI binary.
//!
//! These validate argument parsing, help output, and offline error
//! handling -- all without requiring a live API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `tenra` binary with env isolation.
///
/// Clears all `TENRA_*` env vars and points config/data directories at
/// a nonexistent path so tests never touch the user's real state.
fn tenra_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tenra");
    cmd.env("HOME", "/tmp/tenra-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/tenra-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/tenra-cli-test-nonexistent")
        .env_remove("TENRA_PROFILE")
        .env_remove("TENRA_API_URL")
        .env_remove("TENRA_OUTPUT")
        .env_remove("TENRA_INSECURE")
        .env_remove("TENRA_TIMEOUT")
        .env_remove("TENRA_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = tenra_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    tenra_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("back office")
            .and(predicate::str::contains("categories"))
            .and(predicate::str::contains("products"))
            .and(predicate::str::contains("orders")),
    );
}

#[test]
fn test_version_flag() {
    tenra_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tenra"));
}

#[test]
fn test_subcommand_help() {
    tenra_cmd()
        .args(["categories", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list").and(predicate::str::contains("create")));
}

// ── Offline error handling ──────────────────────────────────────────

#[test]
fn test_data_command_without_config_fails_with_usage_exit() {
    let output = tenra_cmd().args(["stores", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("No configuration"),
        "Expected config hint in output:\n{text}"
    );
}

#[test]
fn test_data_command_without_session_fails_with_auth_exit() {
    let output = tenra_cmd()
        .args(["--api-url", "https://api.invalid.example", "stores", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("tenra login"),
        "Expected sign-in hint in output:\n{text}"
    );
}

#[test]
fn test_config_path_never_touches_network() {
    tenra_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_unknown_subcommand_is_a_usage_error() {
    tenra_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

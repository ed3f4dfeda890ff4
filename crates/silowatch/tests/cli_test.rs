//! Integration tests for the `silowatch` CLI binary.
//!
//! These tests validate argument parsing, help output, shell
//! completions, and error handling -- all without a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `silowatch` binary with env isolation.
///
/// Clears all `SILOWATCH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn silowatch_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("silowatch");
    cmd.env("HOME", "/tmp/silowatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/silowatch-cli-test-nonexistent")
        .env_remove("SILOWATCH_CONFIG_FILE")
        .env_remove("SILOWATCH_HOST")
        .env_remove("SILOWATCH_GATEWAY")
        .env_remove("SILOWATCH_MIRROR")
        .env_remove("SILOWATCH_TIMEOUT")
        .env_remove("SILOWATCH_OUTPUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = silowatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn help_flag_lists_commands() {
    silowatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("status")
            .and(predicate::str::contains("history"))
            .and(predicate::str::contains("sync"))
            .and(predicate::str::contains("alarms"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn version_flag() {
    silowatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("silowatch"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn completions_bash() {
    silowatch_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn completions_zsh() {
    silowatch_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn invalid_subcommand() {
    let output = silowatch_cmd().arg("frobnicate").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("frobnicate"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn invalid_device_name_is_a_usage_error() {
    let output = silowatch_cmd().args(["status", "elevator"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("crane1") && text.contains("transfer-car"),
        "Expected the valid device names in the error:\n{text}"
    );
}

#[test]
fn invalid_output_format() {
    let output = silowatch_cmd()
        .args(["--output", "xml", "status"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn crane_sync_is_rejected_without_touching_the_network() {
    let output = silowatch_cmd().args(["sync", "crane1"]).output().unwrap();
    assert_eq!(output.status.code(), Some(5), "Expected exit code 5");
    let text = combined_output(&output);
    assert!(
        text.contains("no PLC sync"),
        "Expected the sync-unsupported message:\n{text}"
    );
}

// ── Degraded-read behavior ──────────────────────────────────────────

#[test]
fn status_against_dead_backends_reports_unavailable_and_succeeds() {
    // Port 9 (discard) refuses immediately; the read path degrades
    // instead of failing, so the command still exits 0.
    silowatch_cmd()
        .args([
            "--gateway",
            "http://127.0.0.1:9/api",
            "--mirror",
            "http://127.0.0.1:9/api/mariadb",
            "--color",
            "never",
            "status",
            "bridge",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("unavailable"));
}

#[test]
fn sync_against_dead_backend_fails_loudly() {
    // The write path must propagate failure, unlike the read path.
    silowatch_cmd()
        .args([
            "--mirror",
            "http://127.0.0.1:9/api/mariadb",
            "sync",
            "transfer-car",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sync"));
}

// ── Config subcommand ───────────────────────────────────────────────

#[test]
fn config_init_writes_a_file_show_reads_it_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path_str = path.to_str().unwrap();

    silowatch_cmd()
        .args(["--config", path_str, "config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    silowatch_cmd()
        .args(["--config", path_str, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[backend]").and(predicate::str::contains("host")));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[backend]\nhost = \"localhost\"\n").unwrap();
    let path_str = path.to_str().unwrap();

    silowatch_cmd()
        .args(["--config", path_str, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    silowatch_cmd()
        .args(["--config", path_str, "config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_path_prints_the_override() {
    silowatch_cmd()
        .args(["--config", "/tmp/silowatch-test/config.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/silowatch-test/config.toml"));
}

// ── Plain output for scripting ──────────────────────────────────────

#[test]
fn plain_status_emits_one_line_per_device() {
    let output = silowatch_cmd()
        .args([
            "--gateway",
            "http://127.0.0.1:9/api",
            "--mirror",
            "http://127.0.0.1:9/api/mariadb",
            "--output",
            "plain",
            "status",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "one line per configured device:\n{stdout}");
    assert!(lines.iter().all(|l| l.ends_with("unavailable")));
}

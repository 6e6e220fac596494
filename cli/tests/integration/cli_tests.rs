//! Argument parsing, help and version output.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::tether;

#[test]
fn test_cli_no_args_shows_help() {
    let home = tempfile::tempdir().expect("tempdir");
    // clap with arg_required_else_help shows help on stderr and exits 2, but
    // only when no argument, env-supplied ones included, carries a value.
    tether(home.path())
        .env_remove("NO_COLOR")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Remote development environments"));
}

#[test]
fn test_no_color_accepts_conventional_values() {
    let home = tempfile::tempdir().expect("tempdir");
    for value in ["1", "true", "yes", "0", ""] {
        tether(home.path())
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("tether v"));
    }
}

#[test]
fn test_cli_help_lists_commands() {
    let home = tempfile::tempdir().expect("tempdir");
    tether(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("services"))
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("probe"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    let home = tempfile::tempdir().expect("tempdir");
    tether(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tether"));
}

#[test]
fn test_version_command_shows_version() {
    let home = tempfile::tempdir().expect("tempdir");
    tether(home.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "tether v{}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = tether(home.path())
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_command_fails() {
    let home = tempfile::tempdir().expect("tempdir");
    tether(home.path()).arg("deploy").assert().failure();
}

#[test]
fn test_invalid_config_file_is_reported() {
    let home = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        home.path().join("config.yaml"),
        "lifecycle:\n  max_ticks: 0\n",
    )
    .expect("write");
    tether(home.path())
        .arg("version")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

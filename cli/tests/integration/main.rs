//! Integration tests for tether CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! They are slower and should be run separately from unit tests.

mod cli_tests;
mod lifecycle_commands;
mod manifest_commands;

use std::path::Path;

use assert_cmd::Command;

/// The binary with an isolated configuration and no colors.
pub fn tether(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tether"));
    cmd.env("NO_COLOR", "1")
        .env("TETHER_CONFIG", home.join("config.yaml"))
        .env("TETHER_STATE_DIR", home.join("state"))
        .env_remove("TETHER_NAMESPACE")
        .env_remove("TETHER_TOOL")
        .env_remove("TETHER_LOG")
        .env("CI", "1");
    cmd
}

//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`: never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::lifecycle::LifecycleState;
use crate::domain::{
    EnvironmentKey, EnvironmentSession, Manifest, ManifestError, ProbeError, TetherConfig,
};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds the
    /// runner's timeout. On timeout, the child process must be killed.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Spawn a program without waiting for it to finish. Stdin is closed;
    /// stdout and stderr are inherited.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn spawn(&self, program: &str, args: &[&str]) -> Result<tokio::process::Child>;
}

// ── Environment Tool Port ─────────────────────────────────────────────────────

/// The external command-line tool that creates and removes environments.
#[allow(async_fn_in_trait)]
pub trait EnvironmentTool {
    /// Start bringing the session's environment up. Returns once the tool is
    /// running; progress is reported through the marker, not this call.
    async fn up(&self, session: &EnvironmentSession) -> Result<()>;
    /// Tear the environment down and wait for the tool to finish.
    async fn down(&self, key: &EnvironmentKey, manifest_path: &Path) -> Result<()>;
}

// ── Marker Port ───────────────────────────────────────────────────────────────

/// Read access to the progress marker the tool maintains.
#[allow(async_fn_in_trait)]
pub trait MarkerSource {
    /// Raw marker content, or `None` when the tool has not written it yet.
    async fn read_marker(&self, key: &EnvironmentKey) -> Result<Option<String>>;
}

// ── Readiness Port ────────────────────────────────────────────────────────────

/// Liveness check of the local tunnel endpoint.
#[allow(async_fn_in_trait)]
pub trait ReadinessProbe {
    /// Try one TCP handshake with `localhost:port` within `timeout`.
    async fn probe(&self, port: u16, timeout: Duration) -> Result<bool, ProbeError>;
}

// ── Manifest Port ─────────────────────────────────────────────────────────────

/// Loads manifests from wherever the project lives.
#[allow(async_fn_in_trait)]
pub trait ManifestSource {
    /// Read, decode and validate one manifest file.
    async fn read_manifest(&self, path: &Path) -> Result<Manifest, ManifestError>;
    /// Candidate manifest files under `root`, sorted.
    async fn discover(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

// ── Progress Reporting Ports ──────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Receives lifecycle state changes, once per distinct state per session.
pub trait LifecycleObserver {
    fn state_changed(&self, state: LifecycleState, message: Option<&str>);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading the user configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<TetherConfig>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}

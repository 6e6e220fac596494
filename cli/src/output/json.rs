//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed object to stdout. When a
//! command fails, [`format_error`] produces the error object instead and
//! [`error_code`] picks its machine-readable `code`.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::services::environment_up::UpOutcome;
use crate::domain::{EnvironmentSession, Manifest};
use crate::domain::error::{LifecycleError, ManifestError, ProbeError};
use crate::domain::lifecycle::PollOutcome;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for the first typed error in the chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ManifestError>() {
            return match e {
                ManifestError::Unreadable { .. } => "unreadable_manifest",
                ManifestError::InvalidSyntax { .. } => "invalid_syntax",
                ManifestError::EmptyManifest => "empty_manifest",
            };
        }
        if let Some(e) = cause.downcast_ref::<LifecycleError>() {
            return match e {
                LifecycleError::Failed { .. } => "lifecycle_failed",
                LifecycleError::Timeout => "lifecycle_timeout",
            };
        }
        if let Some(e) = cause.downcast_ref::<ProbeError>() {
            return match e {
                ProbeError::Refused { .. } => "probe_refused",
                ProbeError::Timeout { .. } => "probe_timeout",
            };
        }
    }
    "error"
}

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &serde_json::Value) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_manifest(&self, manifest: &Manifest) -> Result<()> {
        let value = serde_json::to_value(manifest).context("JSON serialization failed")?;
        Self::print(&value)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_discovered(&self, paths: &[PathBuf]) -> Result<()> {
        let manifests: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        Self::print(&serde_json::json!({ "manifests": manifests }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_state(&self, environment: &str, outcome: &PollOutcome) -> Result<()> {
        Self::print(&serde_json::json!({
            "environment": environment,
            "state": outcome.state,
            "message": outcome.message,
            "progress": outcome.state.message(),
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_session(&self, session: &EnvironmentSession, outcome: UpOutcome) -> Result<()> {
        let state = match outcome {
            UpOutcome::Ready => "ready",
            UpOutcome::Cancelled => "cancelled",
        };
        Self::print(&serde_json::json!({
            "environment": session.key.to_string(),
            "service": session.service,
            "remote_port": session.remote_port,
            "state": state,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_probe(&self, port: u16, ready: bool) -> Result<()> {
        Self::print(&serde_json::json!({ "port": port, "ready": ready }))
    }
}

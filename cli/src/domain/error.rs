//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

// ── Manifest errors ───────────────────────────────────────────────────────────

/// Errors raised while reading a project manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Cannot read manifest {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest syntax: {reason}")]
    InvalidSyntax { reason: String },

    #[error(
        "Manifest defines no services or tests. Supported formats: okteto manifest v2 (dev/deploy/build/test) or docker-compose with bind-mounted volumes."
    )]
    EmptyManifest,
}

// ── Environment errors ────────────────────────────────────────────────────────

/// Errors related to environment identity and service selection.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Invalid namespace '{0}': must match ^[a-z0-9]([a-z0-9-]{{0,61}}[a-z0-9])?$")]
    InvalidNamespace(String),

    #[error("Invalid environment name '{0}': must match ^[a-z0-9]([a-z0-9-]{{0,61}}[a-z0-9])?$")]
    InvalidName(String),

    #[error("No namespace given. Pass --namespace, set TETHER_NAMESPACE, or set 'namespace' in the config file.")]
    MissingNamespace,

    #[error("Service '{name}' not found in manifest. Available: {available}")]
    ServiceNotFound { name: String, available: String },

    #[error("Manifest has several services; choose one with --service. Available: {available}")]
    ServiceChoiceRequired { available: String },

    #[error("Manifest defines no development services.")]
    NoServices,
}

// ── Lifecycle errors ──────────────────────────────────────────────────────────

/// Terminal failures of a lifecycle poll session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Development environment failed: {message}")]
    Failed { message: String },

    #[error(
        "Development environment did not become ready in time. Check the environment tool output for errors and try again."
    )]
    Timeout,
}

// ── Probe errors ──────────────────────────────────────────────────────────────

/// Failures of the tunnel readiness probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Connection to localhost:{port} refused: {source}")]
    Refused {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection to localhost:{port} timed out after {}s", .after.as_secs())]
    Timeout { port: u16, after: Duration },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

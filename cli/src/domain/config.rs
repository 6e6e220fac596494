//! Domain types and validators for tether configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::lifecycle::{DEFAULT_MAX_TICKS, LifecycleSettings};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.tether/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TetherConfig {
    /// External environment tool.
    pub tool: ToolConfig,
    /// Namespace used when `--namespace` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Poll and probe timing.
    pub lifecycle: LifecycleConfig,
}

/// External tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolConfig {
    /// Binary name or path, e.g. `okteto`.
    pub binary: String,
    /// Directory the tool writes progress markers under. Defaults to `~/.okteto`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary: "okteto".to_string(),
            state_dir: None,
        }
    }
}

/// Lifecycle timing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LifecycleConfig {
    pub poll_interval_ms: u64,
    pub max_ticks: u32,
    pub probe_timeout_secs: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_ticks: DEFAULT_MAX_TICKS,
            probe_timeout_secs: 60,
        }
    }
}

impl LifecycleConfig {
    #[must_use]
    pub fn settings(&self) -> LifecycleSettings {
        LifecycleSettings {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_ticks: self.max_ticks,
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

impl TetherConfig {
    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.binary.trim().is_empty() {
            return Err(invalid("tool.binary", "must not be empty"));
        }
        if self.lifecycle.poll_interval_ms == 0 {
            return Err(invalid("lifecycle.poll_interval_ms", "must be greater than 0"));
        }
        if self.lifecycle.max_ticks == 0 {
            return Err(invalid("lifecycle.max_ticks", "must be greater than 0"));
        }
        if self.lifecycle.probe_timeout_secs == 0 {
            return Err(invalid("lifecycle.probe_timeout_secs", "must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

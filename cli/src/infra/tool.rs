//! Infrastructure implementation of the `EnvironmentTool` port.
//!
//! `OktetoTool<R>` routes all environment tool calls through a
//! `CommandRunner`. The `up` process keeps running for as long as the
//! environment is in use, so its handle is held here and killed on teardown
//! or drop.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tokio::process::Child;

use crate::application::ports::{CommandRunner, EnvironmentTool};
use crate::domain::{EnvironmentKey, EnvironmentSession};
use crate::infra::command_runner::TokioCommandRunner;

/// Infrastructure adapter for the external environment tool.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner.
pub struct OktetoTool<R: CommandRunner> {
    runner: R,
    binary: String,
    up_process: Mutex<Option<Child>>,
}

impl<R: CommandRunner> OktetoTool<R> {
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
            up_process: Mutex::new(None),
        }
    }

    /// Kill a still-running `up` process, if any.
    fn stop_up_process(&self) {
        let child = self
            .up_process
            .lock()
            .map(|mut guard| guard.take())
            .unwrap_or_default();
        if let Some(mut child) = child {
            tracing::debug!(binary = %self.binary, "stopping up process");
            let _ = child.start_kill();
        }
    }
}

impl OktetoTool<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner(binary: &str) -> Self {
        Self::new(TokioCommandRunner::default(), binary)
    }
}

/// Arguments for `<tool> up`.
#[must_use]
pub fn up_args(session: &EnvironmentSession, manifest: &str, port: &str) -> Vec<String> {
    vec![
        "up".to_string(),
        session.service.name.clone(),
        "--namespace".to_string(),
        session.key.namespace.clone(),
        "--file".to_string(),
        manifest.to_string(),
        "--remote".to_string(),
        port.to_string(),
    ]
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().context("manifest path is not valid UTF-8")
}

impl<R: CommandRunner> EnvironmentTool for OktetoTool<R> {
    async fn up(&self, session: &EnvironmentSession) -> Result<()> {
        let manifest = path_str(&session.manifest_path)?;
        let args = up_args(session, manifest, &session.remote_port.to_string());
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        self.stop_up_process();
        let child = self
            .runner
            .spawn(&self.binary, &args)
            .with_context(|| format!("{} up", self.binary))?;
        if let Ok(mut guard) = self.up_process.lock() {
            *guard = Some(child);
        }
        Ok(())
    }

    async fn down(&self, key: &EnvironmentKey, manifest_path: &Path) -> Result<()> {
        self.stop_up_process();
        let manifest = path_str(manifest_path)?;
        let output = self
            .runner
            .run(
                &self.binary,
                &["down", "--namespace", &key.namespace, "--file", manifest],
            )
            .await
            .with_context(|| format!("{} down", self.binary))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{} down failed: {}", self.binary, stderr.trim());
        }
        Ok(())
    }
}

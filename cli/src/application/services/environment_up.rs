//! Application service: bring a development environment up.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    EnvironmentTool, LifecycleObserver, MarkerSource, ProgressReporter, ReadinessProbe,
};
use crate::application::services::lifecycle::wait_until_ready;
use crate::domain::{EnvironmentSession, LifecycleSettings};

/// Outcome of the `environment_up` use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpOutcome {
    /// The environment reported `ready` and its tunnel accepts connections.
    Ready,
    /// The caller cancelled while waiting; the environment was torn down.
    Cancelled,
}

/// Launch the tool, wait for `ready`, then confirm the tunnel is live.
///
/// Cancellation is checked between poll ticks and triggers `down`.
///
/// # Errors
///
/// Returns an error if the tool cannot be launched, the environment fails or
/// times out (`LifecycleError`), the tunnel probe fails (`ProbeError`), or
/// teardown after cancellation fails.
#[allow(clippy::too_many_arguments)]
pub async fn environment_up(
    session: &EnvironmentSession,
    tool: &impl EnvironmentTool,
    marker: &impl MarkerSource,
    probe: &impl ReadinessProbe,
    observer: &impl LifecycleObserver,
    reporter: &impl ProgressReporter,
    settings: &LifecycleSettings,
    cancel: &CancellationToken,
) -> Result<UpOutcome> {
    reporter.step(&format!(
        "launching development environment for '{}'...",
        session.service.name
    ));
    tool.up(session)
        .await
        .context("launching development environment")?;

    let Some(outcome) = wait_until_ready(marker, &session.key, observer, settings, cancel).await
    else {
        reporter.warn("cancelled, tearing the environment down...");
        tool.down(&session.key, &session.manifest_path)
            .await
            .context("tearing down cancelled environment")?;
        return Ok(UpOutcome::Cancelled);
    };
    outcome.into_result()?;

    reporter.step(&format!(
        "checking tunnel on localhost:{}...",
        session.remote_port
    ));
    probe.probe(session.remote_port, settings.probe_timeout).await?;
    reporter.success("development environment ready");
    Ok(UpOutcome::Ready)
}

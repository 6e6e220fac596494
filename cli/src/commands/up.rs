//! Up command: start an environment, wait for it, then watch it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::app::AppContext;
use crate::application::ports::ManifestSource;
use crate::application::services::environment_up::{UpOutcome, environment_up};
use crate::application::services::lifecycle::watch_for_failure;
use crate::commands::resolve_manifest;
use crate::domain::{EnvironmentSession, LifecycleError};
use crate::infra::manifest_fs::FsManifestSource;
use crate::infra::network::{TcpReadinessProbe, free_port};

/// Arguments for the up command.
#[derive(Args)]
pub struct UpArgs {
    /// Manifest to start from (defaults to okteto.yml or docker-compose.yml here)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Development service to start (prompted for when several exist)
    #[arg(long, short)]
    pub service: Option<String>,

    /// Namespace to start in (defaults to the configured namespace)
    #[arg(long, short)]
    pub namespace: Option<String>,
}

/// Run the full lifecycle.
///
/// Ctrl-C while waiting cancels and tears the environment down. Once ready,
/// the marker is watched until Ctrl-C or a later failure. With `--json`, the
/// session object is printed when the watch ends cleanly; a failure prints
/// only the error object.
///
/// # Errors
///
/// Returns an error if the session cannot be built, the environment fails or
/// times out, the tunnel never answers, or it fails after becoming ready.
pub async fn run(app: &AppContext, args: &UpArgs) -> Result<()> {
    let path = resolve_manifest(args.manifest.as_deref(), &std::env::current_dir()?)?;
    let manifest = FsManifestSource
        .read_manifest(&path)
        .await
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let service = app.select_service(&manifest, args.service.as_deref())?;
    let namespace = app.namespace(args.namespace.as_deref())?;
    let port = match service.port {
        0 => free_port().await?,
        declared => declared,
    };
    let session = EnvironmentSession::new(&namespace, path, service, port)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let tool = app.tool();
    let marker = app.marker()?;
    let settings = app.lifecycle_settings();
    let reporter = app.terminal_reporter();

    let outcome = environment_up(
        &session,
        &tool,
        &marker,
        &TcpReadinessProbe,
        &reporter,
        &reporter,
        &settings,
        &cancel,
    )
    .await?;
    // JSON output is a single document, written once the session is over.
    if outcome == UpOutcome::Cancelled || !app.is_json() {
        app.renderer().render_session(&session, outcome)?;
    }
    if outcome == UpOutcome::Cancelled {
        return Ok(());
    }

    app.output.info("Watching for failures. Press Ctrl-C to stop.");
    let mut failure = None;
    watch_for_failure(&marker, &session.key, &settings, &cancel, |message| {
        failure = Some(message);
    })
    .await;
    match failure {
        Some(message) => Err(LifecycleError::Failed { message }.into()),
        None if app.is_json() => app.renderer().render_session(&session, outcome),
        None => Ok(()),
    }
}

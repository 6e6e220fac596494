//! Down command: remove a development environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ManifestSource;
use crate::application::services::environment_down::environment_down;
use crate::commands::resolve_manifest;
use crate::domain::EnvironmentKey;
use crate::infra::manifest_fs::FsManifestSource;

/// Arguments for the down command.
#[derive(Args)]
pub struct DownArgs {
    /// Manifest the environment was started from
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Development service to remove
    #[arg(long, short)]
    pub service: Option<String>,

    /// Namespace of the environment (defaults to the configured namespace)
    #[arg(long, short)]
    pub namespace: Option<String>,
}

/// # Errors
///
/// Returns an error if the manifest, service or namespace cannot be resolved,
/// or the tool's teardown fails.
pub async fn run(app: &AppContext, args: &DownArgs) -> Result<()> {
    let path = resolve_manifest(args.manifest.as_deref(), &std::env::current_dir()?)?;
    let manifest = FsManifestSource
        .read_manifest(&path)
        .await
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let service = app.select_service(&manifest, args.service.as_deref())?;
    let namespace = app.namespace(args.namespace.as_deref())?;
    let key = EnvironmentKey::new(&namespace, &service.name)?;

    environment_down(&key, &path, &app.tool(), &app.terminal_reporter()).await
}

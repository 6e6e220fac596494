//! Services command: parse a manifest and list what it declares.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ManifestSource;
use crate::commands::resolve_manifest;
use crate::infra::manifest_fs::FsManifestSource;

/// Arguments for the services command.
#[derive(Args)]
pub struct ServicesArgs {
    /// Manifest to read (defaults to okteto.yml or docker-compose.yml here)
    pub manifest: Option<PathBuf>,
}

/// # Errors
///
/// Returns an error if the manifest is missing, unreadable or invalid.
pub async fn run(app: &AppContext, args: &ServicesArgs) -> Result<()> {
    let path = resolve_manifest(args.manifest.as_deref(), &std::env::current_dir()?)?;
    let manifest = FsManifestSource
        .read_manifest(&path)
        .await
        .with_context(|| format!("reading manifest {}", path.display()))?;
    app.renderer().render_manifest(&manifest)
}

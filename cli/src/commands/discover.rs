//! Discover command: list candidate manifests under a directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ManifestSource;
use crate::infra::manifest_fs::FsManifestSource;

/// Arguments for the discover command.
#[derive(Args)]
pub struct DiscoverArgs {
    /// Directory to search
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

/// # Errors
///
/// Returns an error if the directory cannot be walked.
pub async fn run(app: &AppContext, args: &DiscoverArgs) -> Result<()> {
    let found = FsManifestSource.discover(&args.dir).await?;
    app.renderer().render_discovered(&found)
}

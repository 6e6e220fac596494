//! Infrastructure implementation of the `ManifestSource` port.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::application::ports::ManifestSource;
use crate::domain::manifest::{self, Manifest};
use crate::domain::ManifestError;

/// File names that look like an okteto or docker-compose manifest.
static MANIFEST_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^(okteto|docker-compose)[^/\\]*\.ya?ml$").expect("valid regex")
});

/// Directories never worth descending into.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// Reads manifests from the local filesystem.
pub struct FsManifestSource;

impl ManifestSource for FsManifestSource {
    async fn read_manifest(&self, path: &Path) -> Result<Manifest, ManifestError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ManifestError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let manifest = manifest::from_yaml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            services = manifest.services().len(),
            tests = manifest.tests().len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    async fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || walk(&root))
        .await
        .context("manifest discovery task panicked")?
    }
}

/// `true` for file names the discovery walk reports.
#[must_use]
pub fn is_manifest_name(name: &str) -> bool {
    MANIFEST_NAME_RE.is_match(name)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// Depth-first walk in file-name order, so results come out sorted.
///
/// Only an unreadable `root` is an error; anything below it that cannot be
/// read is skipped.
fn walk(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let entries = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(err).with_context(|| format!("reading directory {}", root.display()));
            }
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_manifest_name(&entry.file_name().to_string_lossy()) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

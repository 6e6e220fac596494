//! Command implementations

pub mod discover;
pub mod down;
pub mod probe;
pub mod services;
pub mod status;
pub mod up;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Manifest names tried, in order, when none is given.
pub const DEFAULT_MANIFESTS: &[&str] = &[
    "okteto.yml",
    "okteto.yaml",
    "docker-compose.yml",
    "docker-compose.yaml",
];

/// Use `explicit` when given, otherwise the first default manifest in `dir`.
///
/// # Errors
///
/// Returns an error if no manifest was given and none exists in `dir`.
pub fn resolve_manifest(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    DEFAULT_MANIFESTS
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no manifest found in {}. Pass one with --manifest or run 'tether discover'.",
                dir.display()
            )
        })
}

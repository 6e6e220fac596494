//! Infrastructure implementation of the `MarkerSource` port.
//!
//! The environment tool keeps a one-line state file per environment under
//! its state directory. Reads go through `tokio::fs` so a poll tick never
//! blocks a runtime worker.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tether_common::state_file_path;

use crate::application::ports::MarkerSource;
use crate::domain::EnvironmentKey;

/// Reads `<state_dir>/<namespace>/<name>/okteto.state`.
pub struct StateFileMarker {
    state_dir: PathBuf,
}

impl StateFileMarker {
    #[must_use]
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    /// Marker location for `key`.
    #[must_use]
    pub fn path(&self, key: &EnvironmentKey) -> PathBuf {
        state_file_path(&self.state_dir, &key.namespace, &key.name)
    }
}

impl MarkerSource for StateFileMarker {
    async fn read_marker(&self, key: &EnvironmentKey) -> Result<Option<String>> {
        let path = self.path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading progress marker {}", path.display())),
        }
    }
}

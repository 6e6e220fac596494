//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::TetherConfig;

/// Production implementation of `ConfigStore` that uses a YAML file on disk,
/// with environment variable overrides applied on top.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<TetherConfig> {
        let path = self.path()?;
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        } else {
            TetherConfig::default()
        };
        apply_env_overrides(&mut config);
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("TETHER_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".tether").join("config.yaml"))
    }
}

/// `TETHER_TOOL`, `TETHER_STATE_DIR` and `TETHER_NAMESPACE` win over the file.
fn apply_env_overrides(config: &mut TetherConfig) {
    if let Ok(binary) = std::env::var("TETHER_TOOL") {
        config.tool.binary = binary;
    }
    if let Ok(dir) = std::env::var("TETHER_STATE_DIR") {
        config.tool.state_dir = Some(PathBuf::from(dir));
    }
    if let Ok(namespace) = std::env::var("TETHER_NAMESPACE") {
        config.namespace = Some(namespace);
    }
}

/// Directory the environment tool writes progress markers under.
///
/// # Errors
///
/// Returns an error if no directory is configured and the home directory
/// cannot be determined.
pub fn state_dir(config: &TetherConfig) -> Result<PathBuf> {
    if let Some(dir) = &config.tool.state_dir {
        return Ok(dir.clone());
    }
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(".okteto"))
}

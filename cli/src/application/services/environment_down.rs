//! Application service: tear a development environment down.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{EnvironmentTool, ProgressReporter};
use crate::domain::EnvironmentKey;

/// Run the tool's teardown for `key`.
///
/// # Errors
///
/// Returns an error if the tool cannot be run or exits unsuccessfully.
pub async fn environment_down(
    key: &EnvironmentKey,
    manifest_path: &Path,
    tool: &impl EnvironmentTool,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step(&format!("removing development environment {key}..."));
    tool.down(key, manifest_path)
        .await
        .with_context(|| format!("removing development environment {key}"))?;
    reporter.success("development environment removed");
    Ok(())
}

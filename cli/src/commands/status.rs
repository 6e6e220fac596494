//! Status command: read an environment's progress marker once.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::lifecycle::current_state;
use crate::domain::EnvironmentKey;

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Development service name
    #[arg(long, short)]
    pub service: String,

    /// Namespace of the environment (defaults to the configured namespace)
    #[arg(long, short)]
    pub namespace: Option<String>,
}

/// # Errors
///
/// Returns an error if the namespace or service name is invalid, or the
/// marker exists but cannot be read.
pub async fn run(app: &AppContext, args: &StatusArgs) -> Result<()> {
    let namespace = app.namespace(args.namespace.as_deref())?;
    let key = EnvironmentKey::new(&namespace, &args.service)?;
    let outcome = current_state(&app.marker()?, &key).await?;
    app.renderer().render_state(&key.to_string(), &outcome)
}

//! Probe command: one readiness check against a local port.

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ReadinessProbe;
use crate::infra::network::TcpReadinessProbe;

/// Arguments for the probe command.
#[derive(Args)]
pub struct ProbeArgs {
    /// Local port to connect to
    pub port: u16,

    /// Give up after this many seconds (defaults to the configured probe timeout)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// # Errors
///
/// Returns `ProbeError` if the port refuses the connection or does not answer
/// in time.
pub async fn run(app: &AppContext, args: &ProbeArgs) -> Result<()> {
    let timeout = args
        .timeout_secs
        .map_or_else(|| app.lifecycle_settings().probe_timeout, Duration::from_secs);
    let ready = TcpReadinessProbe.probe(args.port, timeout).await?;
    app.renderer().render_probe(args.port, ready)
}

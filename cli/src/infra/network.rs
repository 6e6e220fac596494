//! Network infrastructure: tunnel readiness probe and free-port lookup.

use std::io::ErrorKind;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::{TcpListener, TcpStream};

use crate::application::ports::ReadinessProbe;
use crate::domain::ProbeError;

/// Probes `localhost:<port>` with a single TCP handshake.
pub struct TcpReadinessProbe;

impl ReadinessProbe for TcpReadinessProbe {
    async fn probe(&self, port: u16, timeout: Duration) -> Result<bool, ProbeError> {
        match tokio::time::timeout(timeout, TcpStream::connect(("localhost", port))).await {
            Ok(Ok(stream)) => {
                tracing::debug!(port, "tunnel accepted connection");
                drop(stream);
                Ok(true)
            }
            Ok(Err(source)) => {
                if source.kind() != ErrorKind::ConnectionRefused {
                    tracing::debug!(port, error = %source, "tunnel probe failed");
                }
                Err(ProbeError::Refused { port, source })
            }
            Err(_) => Err(ProbeError::Timeout {
                port,
                after: timeout,
            }),
        }
    }
}

/// Ask the OS for an unused loopback port for the tunnel.
///
/// # Errors
///
/// Returns an error if no loopback socket can be bound.
pub async fn free_port() -> Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .context("binding a loopback port")?;
    let port = listener
        .local_addr()
        .context("reading bound loopback address")?
        .port();
    Ok(port)
}

//! Environment identity and the per-operation session.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::EnvironmentError;
use crate::domain::manifest::{Manifest, Service};

/// RFC 1123 label, the shape of Kubernetes namespaces and resource names.
pub static RESOURCE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Compile-time constant pattern.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("valid regex")
});

/// Namespace/name pair that scopes a running environment and its marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentKey {
    pub namespace: String,
    pub name: String,
}

impl EnvironmentKey {
    /// # Errors
    ///
    /// Returns an error if either part is not a valid RFC 1123 label.
    pub fn new(namespace: &str, name: &str) -> Result<Self, EnvironmentError> {
        if !RESOURCE_NAME_RE.is_match(namespace) {
            return Err(EnvironmentError::InvalidNamespace(namespace.to_string()));
        }
        if !RESOURCE_NAME_RE.is_match(name) {
            return Err(EnvironmentError::InvalidName(name.to_string()));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for EnvironmentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Everything one `up` or `down` needs, owned for the length of the operation.
#[derive(Debug, Clone)]
pub struct EnvironmentSession {
    pub key: EnvironmentKey,
    pub manifest_path: PathBuf,
    pub service: Service,
    /// Local end of the SSH tunnel.
    pub remote_port: u16,
}

/// Pick the service to develop on.
///
/// With `requested`, the name must exist. Without it, a single service name is
/// picked; several services return `ServiceChoiceRequired` so the caller can
/// prompt.
///
/// # Errors
///
/// Returns `NoServices`, `ServiceNotFound` or `ServiceChoiceRequired`.
pub fn select_service<'a>(
    manifest: &'a Manifest,
    requested: Option<&str>,
) -> Result<&'a Service, EnvironmentError> {
    let services = manifest.distinct_services();
    if services.is_empty() {
        return Err(EnvironmentError::NoServices);
    }
    match requested {
        Some(name) => manifest
            .service(name)
            .ok_or_else(|| EnvironmentError::ServiceNotFound {
                name: name.to_string(),
                available: manifest.service_names(),
            }),
        None => match services.as_slice() {
            [only] => Ok(*only),
            _ => Err(EnvironmentError::ServiceChoiceRequired {
                available: manifest.service_names(),
            }),
        },
    }
}

impl EnvironmentSession {
    /// # Errors
    ///
    /// Returns an error if the namespace or service name is not a valid label.
    pub fn new(
        namespace: &str,
        manifest_path: PathBuf,
        service: &Service,
        remote_port: u16,
    ) -> Result<Self, EnvironmentError> {
        Ok(Self {
            key: EnvironmentKey::new(namespace, &service.name)?,
            manifest_path,
            service: service.clone(),
            remote_port,
        })
    }
}

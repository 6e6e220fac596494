//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod environment;
pub mod error;
pub mod lifecycle;
pub mod manifest;

pub use config::TetherConfig;
pub use environment::{EnvironmentKey, EnvironmentSession, select_service};
pub use error::{ConfigError, EnvironmentError, LifecycleError, ManifestError, ProbeError};
pub use lifecycle::{LifecycleSettings, Outcome};
pub use manifest::{Dialect, Manifest, Service, Test};

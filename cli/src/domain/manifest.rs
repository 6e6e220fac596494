//! Project manifest model and dialect-aware extraction.
//!
//! Two declarative formats are accepted: the okteto manifest v2 (`dev`,
//! `deploy`, `build`, `test`) and docker-compose. Both are normalised into one
//! [`Manifest`] of services and tests. This module never touches the
//! filesystem; callers hand it decoded YAML.

use std::collections::HashSet;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::domain::error::ManifestError;

/// Top-level keys that mark a v2 manifest.
const V2_KEYS: &[&str] = &["dev", "deploy", "build", "test"];

/// A development service declared by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: String,
    /// Remote working directory, or empty when the manifest gives none.
    pub workdir: String,
    /// Remote SSH port from the `remote` field; `0` when absent.
    pub port: u16,
}

/// A test target declared under the v2 `test` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Test {
    pub name: String,
}

/// Services and tests of one manifest, each sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    services: Vec<Service>,
    tests: Vec<Test>,
}

/// Which schema a decoded document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    V2,
    Compose,
    Unknown,
}

impl Manifest {
    /// Build a manifest, sorting both sequences by name.
    #[must_use]
    pub fn new(mut services: Vec<Service>, mut tests: Vec<Test>) -> Self {
        services.sort_by(|a, b| a.name.cmp(&b.name));
        tests.sort_by(|a, b| a.name.cmp(&b.name));
        Self { services, tests }
    }

    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    #[must_use]
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// `true` when the manifest has neither services nor tests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.tests.is_empty()
    }

    /// Look up a service by exact name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// The first record of each service name.
    ///
    /// Compose yields one record per bind mount, so a name can repeat; this
    /// is the list to choose a service from.
    #[must_use]
    pub fn distinct_services(&self) -> Vec<&Service> {
        let mut distinct: Vec<&Service> = self.services.iter().collect();
        distinct.dedup_by(|a, b| a.name == b.name);
        distinct
    }

    /// Comma-separated distinct service names, for error messages.
    #[must_use]
    pub fn service_names(&self) -> String {
        self.distinct_services()
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Classify a decoded document. The first matching rule wins.
#[must_use]
pub fn classify(doc: &Mapping) -> Dialect {
    if V2_KEYS.iter().any(|key| doc.contains_key(*key)) {
        return Dialect::V2;
    }
    let has_services = doc
        .get("services")
        .and_then(Value::as_mapping)
        .is_some_and(|m| !m.is_empty());
    if has_services {
        Dialect::Compose
    } else {
        Dialect::Unknown
    }
}

/// Extract services and tests from a decoded document.
///
/// Unknown documents yield an empty manifest; rejecting it is up to
/// [`from_yaml_str`].
#[must_use]
pub fn parse_document(doc: &Mapping) -> Manifest {
    match classify(doc) {
        Dialect::V2 => parse_v2(doc),
        Dialect::Compose => parse_compose(doc),
        Dialect::Unknown => Manifest::default(),
    }
}

/// Decode YAML text and extract a non-empty manifest.
///
/// # Errors
///
/// Returns `InvalidSyntax` if the text is not YAML or its top level is not a
/// mapping, and `EmptyManifest` if no services or tests were found.
pub fn from_yaml_str(text: &str) -> Result<Manifest, ManifestError> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| ManifestError::InvalidSyntax {
        reason: e.to_string(),
    })?;
    let doc = match value {
        Value::Mapping(doc) => doc,
        Value::Null => Mapping::new(),
        _ => {
            return Err(ManifestError::InvalidSyntax {
                reason: "top level must be a mapping".to_string(),
            });
        }
    };
    let manifest = parse_document(&doc);
    if manifest.is_empty() {
        return Err(ManifestError::EmptyManifest);
    }
    Ok(manifest)
}

// ── v2 ────────────────────────────────────────────────────────────────────────

fn parse_v2(doc: &Mapping) -> Manifest {
    let services = section(doc, "dev")
        .map(|(name, entry)| Service {
            name,
            workdir: v2_workdir(entry),
            port: remote_port(entry.get("remote")),
        })
        .collect();
    let tests = section(doc, "test").map(|(name, _)| Test { name }).collect();
    Manifest::new(services, tests)
}

/// Explicit `workdir`, else the remote side of the first `sync` entry.
fn v2_workdir(entry: &Value) -> String {
    if let Some(workdir) = entry.get("workdir").and_then(Value::as_str) {
        return workdir.to_string();
    }
    entry
        .get("sync")
        .and_then(Value::as_sequence)
        .and_then(|sync| sync.first())
        .and_then(Value::as_str)
        .and_then(|folder| folder.rsplit(':').next())
        .unwrap_or_default()
        .to_string()
}

/// `remote` is passed through without validation; anything that is not a
/// port number reads as 0.
fn remote_port(value: Option<&Value>) -> u16 {
    let port = match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    port.unwrap_or(0)
}

// ── docker-compose ────────────────────────────────────────────────────────────

fn parse_compose(doc: &Mapping) -> Manifest {
    let declared: HashSet<String> = doc
        .get("volumes")
        .and_then(Value::as_mapping)
        .map(|volumes| volumes.keys().filter_map(key_name).collect())
        .unwrap_or_default();

    let mut services = Vec::new();
    for (name, entry) in section(doc, "services") {
        let Some(volumes) = entry.get("volumes").and_then(Value::as_sequence) else {
            continue;
        };
        for volume in volumes.iter().filter_map(Value::as_str) {
            let parts: Vec<&str> = volume.split(':').collect();
            if let [source, target] = parts.as_slice()
                && !declared.contains(*source)
            {
                services.push(Service {
                    name: name.clone(),
                    workdir: (*target).to_string(),
                    port: 0,
                });
            }
        }
    }
    Manifest::new(services, Vec::new())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Iterate the entries of a top-level mapping section, if it is one.
fn section<'a>(doc: &'a Mapping, key: &str) -> impl Iterator<Item = (String, &'a Value)> {
    doc.get(key)
        .and_then(Value::as_mapping)
        .into_iter()
        .flat_map(Mapping::iter)
        .filter_map(|(k, v)| key_name(k).map(|name| (name, v)))
}

/// Mapping keys may be plain scalars; YAML lets `8080:` or `true:` through.
fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

//! `services` and `discover` against manifests on disk.

#![allow(clippy::expect_used)]

use std::path::Path;

use predicates::prelude::*;

use crate::tether;

const V2: &str = "\
dev:
  web:
    sync:
      - .:/usr/src/web
  api:
    workdir: /app
    remote: 2222
test:
  unit: {}
  e2e: {}
";

const COMPOSE: &str = "\
services:
  web:
    volumes:
      - .:/usr/src/app
      - data:/var/lib/data
volumes:
  data: {}
";

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write manifest");
}

#[test]
fn test_services_lists_v2_services_and_tests() {
    let home = tempfile::tempdir().expect("tempdir");
    write(home.path(), "okteto.yml", V2);
    tether(home.path())
        .arg("services")
        .arg(home.path().join("okteto.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("/app"))
        .stdout(predicate::str::contains("/usr/src/web"))
        .stdout(predicate::str::contains("Tests:"))
        .stdout(predicate::str::contains("e2e"));
}

#[test]
fn test_services_json_is_sorted() {
    let home = tempfile::tempdir().expect("tempdir");
    write(home.path(), "okteto.yml", V2);
    let output = tether(home.path())
        .arg("services")
        .arg(home.path().join("okteto.yml"))
        .arg("--json")
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["services"][0]["name"], "api");
    assert_eq!(value["services"][0]["port"], 2222);
    assert_eq!(value["services"][1]["name"], "web");
    assert_eq!(value["services"][1]["workdir"], "/usr/src/web");
    assert_eq!(value["tests"][0]["name"], "e2e");
    assert_eq!(value["tests"][1]["name"], "unit");
}

#[test]
fn test_services_defaults_to_compose_in_working_directory() {
    let home = tempfile::tempdir().expect("tempdir");
    write(home.path(), "docker-compose.yml", COMPOSE);
    let output = tether(home.path())
        .current_dir(home.path())
        .args(["services", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let services = value["services"].as_array().expect("services");
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["workdir"], "/usr/src/app");
    assert!(value["tests"].as_array().expect("tests").is_empty());
}

#[test]
fn test_services_empty_manifest_fails() {
    let home = tempfile::tempdir().expect("tempdir");
    write(home.path(), "okteto.yml", "deploy:\n  - helm upgrade\n");
    tether(home.path())
        .arg("services")
        .arg(home.path().join("okteto.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no services or tests"));
}

#[test]
fn test_services_invalid_syntax_reports_json_code() {
    let home = tempfile::tempdir().expect("tempdir");
    write(home.path(), "okteto.yml", "dev: [unclosed\n");
    let output = tether(home.path())
        .arg("services")
        .arg(home.path().join("okteto.yml"))
        .arg("--json")
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "invalid_syntax");
}

#[test]
fn test_services_without_manifest_fails() {
    let home = tempfile::tempdir().expect("tempdir");
    tether(home.path())
        .current_dir(home.path())
        .arg("services")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no manifest found"));
}

#[test]
fn test_discover_finds_nested_manifests_and_skips_vendored() {
    let home = tempfile::tempdir().expect("tempdir");
    let nested = home.path().join("backend");
    let vendored = home.path().join("node_modules").join("pkg");
    std::fs::create_dir_all(&nested).expect("mkdir");
    std::fs::create_dir_all(&vendored).expect("mkdir");
    write(home.path(), "okteto.yml", V2);
    write(&nested, "docker-compose.dev.yaml", COMPOSE);
    write(&vendored, "okteto.yml", V2);
    write(home.path(), "README.md", "hello");

    let output = tether(home.path())
        .arg("discover")
        .arg(home.path())
        .arg("--json")
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let found: Vec<&str> = value["manifests"]
        .as_array()
        .expect("manifests")
        .iter()
        .filter_map(serde_json::Value::as_str)
        .collect();
    assert_eq!(found.len(), 2);
    assert!(found.iter().any(|p| p.ends_with("docker-compose.dev.yaml")));
    assert!(!found.iter().any(|p| p.contains("node_modules")));
}

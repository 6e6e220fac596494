//! `status`, `probe`, `up` and `down` against a scripted environment tool.

#![allow(clippy::expect_used)]

use std::net::TcpListener;
use std::path::{Path, PathBuf};

use predicates::prelude::*;

use crate::tether;

fn write_marker(home: &Path, namespace: &str, name: &str, content: &str) {
    let dir = home.join("state").join(namespace).join(name);
    std::fs::create_dir_all(&dir).expect("mkdir");
    std::fs::write(dir.join("okteto.state"), content).expect("write marker");
}

fn unused_port() -> u16 {
    TcpListener::bind(("127.0.0.1", 0))
        .expect("bind")
        .local_addr()
        .expect("addr")
        .port()
}

#[test]
fn test_status_without_marker_is_provisioning() {
    let home = tempfile::tempdir().expect("tempdir");
    tether(home.path())
        .args(["status", "--service", "api", "--namespace", "team-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("team-a/api"))
        .stdout(predicate::str::contains("provisioning"));
}

#[test]
fn test_status_json_reports_failure_message() {
    let home = tempfile::tempdir().expect("tempdir");
    write_marker(home.path(), "team-a", "api", "failed:image pull: 404\n");
    let output = tether(home.path())
        .args(["status", "--service", "api", "--json"])
        .env("TETHER_NAMESPACE", "team-a")
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["environment"], "team-a/api");
    assert_eq!(value["state"], "failed");
    assert_eq!(value["message"], "image pull: 404");
}

#[test]
fn test_status_requires_namespace() {
    let home = tempfile::tempdir().expect("tempdir");
    tether(home.path())
        .args(["status", "--service", "api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No namespace given"));
}

#[test]
fn test_status_rejects_invalid_service_name() {
    let home = tempfile::tempdir().expect("tempdir");
    tether(home.path())
        .args(["status", "--service", "Not_Valid", "--namespace", "team-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid environment name"));
}

#[test]
fn test_probe_open_port_succeeds() {
    let home = tempfile::tempdir().expect("tempdir");
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let output = tether(home.path())
        .args(["probe", &port.to_string(), "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["ready"], true);
    drop(listener);
}

#[test]
fn test_probe_closed_port_is_refused() {
    let home = tempfile::tempdir().expect("tempdir");
    let port = unused_port();
    let output = tether(home.path())
        .args(["probe", &port.to_string(), "--timeout-secs", "5", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["code"], "probe_refused");
}

// ── scripted tool ─────────────────────────────────────────────────────────────

/// A stand-in for the environment tool that writes the marker itself.
#[cfg(unix)]
fn fake_tool(home: &Path, up_script: &str, down_script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt as _;

    let marker = home.join("state").join("team-a").join("api");
    let script = format!(
        "#!/bin/sh\nmarker='{}'\nmkdir -p \"$marker\"\ncase \"$1\" in\n  up) {up_script} ;;\n  down) {down_script} ;;\nesac\n",
        marker.display()
    );
    let path = home.join("fake-tool");
    std::fs::write(&path, script).expect("write tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

#[cfg(unix)]
fn project(home: &Path, remote: u16) -> PathBuf {
    std::fs::write(
        home.join("config.yaml"),
        "lifecycle:\n  poll_interval_ms: 100\n  max_ticks: 50\n  probe_timeout_secs: 5\n",
    )
    .expect("write config");
    let manifest = home.join("okteto.yml");
    std::fs::write(
        &manifest,
        format!("dev:\n  api:\n    workdir: /app\n    remote: {remote}\n"),
    )
    .expect("write manifest");
    manifest
}

#[cfg(unix)]
#[test]
fn test_up_reports_failure_from_marker() {
    let home = tempfile::tempdir().expect("tempdir");
    let manifest = project(home.path(), unused_port());
    let tool = fake_tool(
        home.path(),
        "echo 'failed:image pull backoff' > \"$marker/okteto.state\"",
        "exit 0",
    );
    let output = tether(home.path())
        .env("TETHER_TOOL", &tool)
        .arg("up")
        .arg("--manifest")
        .arg(&manifest)
        .args(["--namespace", "team-a", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["code"], "lifecycle_failed");
    assert!(
        value["message"]
            .as_str()
            .expect("message")
            .contains("image pull backoff")
    );
}

#[cfg(unix)]
#[test]
fn test_up_watches_ready_environment_until_it_fails() {
    let home = tempfile::tempdir().expect("tempdir");
    let tunnel = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
    let port = tunnel.local_addr().expect("addr").port();
    let manifest = project(home.path(), port);
    let tool = fake_tool(
        home.path(),
        "echo ready > \"$marker/okteto.state\"; sleep 1; echo 'failed:pod evicted' > \"$marker/okteto.state\"",
        "exit 0",
    );
    tether(home.path())
        .env("TETHER_TOOL", &tool)
        .arg("up")
        .arg("--manifest")
        .arg(&manifest)
        .args(["--namespace", "team-a"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("development environment ready"))
        .stdout(predicate::str::contains(format!("localhost:{port}")))
        .stderr(predicate::str::contains("pod evicted"));
    drop(tunnel);
}

#[cfg(unix)]
#[test]
fn test_up_json_failure_after_ready_is_one_document() {
    let home = tempfile::tempdir().expect("tempdir");
    let tunnel = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
    let port = tunnel.local_addr().expect("addr").port();
    let manifest = project(home.path(), port);
    let tool = fake_tool(
        home.path(),
        "echo ready > \"$marker/okteto.state\"; sleep 1; echo 'failed:pod evicted' > \"$marker/okteto.state\"",
        "exit 0",
    );
    let output = tether(home.path())
        .env("TETHER_TOOL", &tool)
        .arg("up")
        .arg("--manifest")
        .arg(&manifest)
        .args(["--namespace", "team-a", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a single JSON document");
    assert_eq!(value["code"], "lifecycle_failed");
    assert!(
        value["message"]
            .as_str()
            .expect("message")
            .contains("pod evicted")
    );
    drop(tunnel);
}

#[cfg(unix)]
#[test]
fn test_down_surfaces_tool_stderr() {
    let home = tempfile::tempdir().expect("tempdir");
    let manifest = project(home.path(), 0);
    let tool = fake_tool(
        home.path(),
        "exit 0",
        "echo 'environment not found' >&2; exit 1",
    );
    tether(home.path())
        .env("TETHER_TOOL", &tool)
        .arg("down")
        .arg("--manifest")
        .arg(&manifest)
        .args(["--namespace", "team-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("environment not found"));
}

#[cfg(unix)]
#[test]
fn test_down_succeeds() {
    let home = tempfile::tempdir().expect("tempdir");
    let manifest = project(home.path(), 0);
    let tool = fake_tool(home.path(), "exit 0", "exit 0");
    tether(home.path())
        .env("TETHER_TOOL", &tool)
        .arg("down")
        .arg("--manifest")
        .arg(&manifest)
        .args(["--namespace", "team-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("development environment removed"));
}

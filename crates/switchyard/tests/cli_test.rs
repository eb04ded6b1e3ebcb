//! Integration tests for the `switchyard` CLI binary.
//!
//! Argument parsing, help output and completions run without any API;
//! device commands run against a wiremock inventory API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `switchyard` binary with env isolation.
///
/// Clears all `SWITCHYARD_*` env vars and points the config file at a
/// nonexistent path so tests never touch the user's real configuration.
fn switchyard_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("switchyard");
    cmd.env("HOME", "/tmp/switchyard-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/switchyard-cli-test-nonexistent")
        .env(
            "SWITCHYARD_CONFIG",
            "/tmp/switchyard-cli-test-nonexistent/config.toml",
        )
        .env_remove("SWITCHYARD_PROFILE")
        .env_remove("SWITCHYARD_API_URL")
        .env_remove("SWITCHYARD_OUTPUT")
        .env_remove("SWITCHYARD_INSECURE")
        .env_remove("SWITCHYARD_TIMEOUT")
        .env_remove("RUST_LOG")
        .write_stdin("");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn switch_json(i: usize) -> serde_json::Value {
    json!({
        "_id": format!("id-{i:02}"),
        "name": format!("SW{i:02}"),
        "ip": format!("10.0.{}.{i}", i % 2),
        "ports": [{
            "port": "Gi1/0/1", "status": "connected", "vlan": "",
            "connected_to": { "device": format!("AP-{i}"), "ip": "", "port": "" }
        }],
        "vlans": [{ "id": 100 + i, "name": "users", "status": "active", "ports": [], "ip": "" }]
    })
}

async fn inventory(n: usize) -> MockServer {
    let server = MockServer::start().await;
    let body: Vec<_> = (0..n).map(switch_json).collect();
    Mock::given(method("GET"))
        .and(path("/api/switches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = switchyard_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    switchyard_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("switch inventory")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    switchyard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("switchyard"));
}

#[test]
fn test_completions() {
    for shell in ["bash", "zsh", "fish"] {
        switchyard_cmd()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::is_empty().not());
    }
}

#[test]
fn test_invalid_subcommand() {
    switchyard_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_invalid_output_format() {
    switchyard_cmd()
        .args(["-o", "xml", "devices", "list"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_config_show_no_config() {
    switchyard_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = switchyard_cmd()
        .args(["-p", "prod", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Profile 'prod' not found"));
}

#[test]
fn test_devices_list_connection_refused() {
    let output = switchyard_cmd()
        .args(["--api-url", "http://127.0.0.1:1/api", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}

// ── Devices against a mocked API ────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_first_page_with_footer() {
    let server = inventory(12).await;
    switchyard_cmd()
        .args(["--api-url", &api_url(&server), "devices", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("SW00")
                .and(predicate::str::contains("SW09"))
                .and(predicate::str::contains("SW10").not())
                .and(predicate::str::contains("Showing 1 to 10 of 12 results (page 1 of 2)")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_page_is_clamped() {
    let server = inventory(12).await;
    switchyard_cmd()
        .args(["--api-url", &api_url(&server), "devices", "list", "--page", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Showing 11 to 12 of 12 results (page 2 of 2)",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_search_sort_plain() {
    let server = inventory(6).await;
    let output = switchyard_cmd()
        .args([
            "--api-url",
            &api_url(&server),
            "-o",
            "plain",
            "devices",
            "list",
            "--search",
            "10.0.1.",
            "--desc",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "id-05\nid-03\nid-01");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_matches_vlan_id_exactly() {
    let server = inventory(6).await;
    let output = switchyard_cmd()
        .args([
            "--api-url",
            &api_url(&server),
            "-o",
            "plain",
            "devices",
            "list",
            "-s",
            "104",
        ])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "id-04");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_unknown_device_exits_not_found() {
    let server = inventory(3).await;
    let output = switchyard_cmd()
        .args(["--api-url", &api_url(&server), "devices", "get", "SW99"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("'SW99' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_shows_ports_and_vlans() {
    let server = inventory(3).await;
    switchyard_cmd()
        .args(["--api-url", &api_url(&server), "--color", "never", "devices", "get", "SW01"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Gi1/0/1")
                .and(predicate::str::contains("AP-1"))
                .and(predicate::str::contains("101")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_posts_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/switches"))
        .and(body_partial_json(json!({
            "name": "SW-new",
            "ip": "10.9.0.1",
            "vlans": [{ "id": 30, "ports": ["1", "2"] }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "fresh-id", "name": "SW-new", "ip": "10.9.0.1", "ports": [],
            "vlans": [{ "id": 30, "name": "", "status": "active", "ports": ["1", "2"], "ip": "" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    switchyard_cmd()
        .args([
            "--api-url",
            &api_url(&server),
            "-o",
            "json",
            "devices",
            "create",
            "--name",
            "SW-new",
            "--ip",
            "10.9.0.1",
            "--set",
            "vlans+",
            "--set",
            "vlans.0.id=30",
            "--set",
            "vlans.0.ports=1, 2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("fresh-id"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_server_error_exits_general() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/switches"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;

    let output = switchyard_cmd()
        .args([
            "--api-url",
            &api_url(&server),
            "devices",
            "create",
            "--name",
            "x",
            "--ip",
            "10.0.0.9",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("HTTP 500"));
}

#[test]
fn test_create_requires_name() {
    switchyard_cmd()
        .args(["--api-url", "http://127.0.0.1:1/api", "devices", "create", "--ip", "10.0.0.1"])
        .assert()
        .failure()
        .code(2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_with_bad_vlan_id_is_usage_error() {
    let server = inventory(2).await;
    let output = switchyard_cmd()
        .args([
            "--api-url",
            &api_url(&server),
            "devices",
            "edit",
            "SW00",
            "--set",
            "vlans.0.id=ten",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("vlans.0.id=ten"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_puts_full_record() {
    let server = inventory(2).await;
    Mock::given(method("PUT"))
        .and(path("/api/switches/id-01"))
        .and(body_partial_json(json!({
            "_id": "id-01",
            "name": "SW01",
            "ports": [{ "connected_to": { "device": "AP-1", "ip": "10.0.0.254" } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(switch_json(1)))
        .expect(1)
        .mount(&server)
        .await;

    switchyard_cmd()
        .args([
            "--api-url",
            &api_url(&server),
            "devices",
            "edit",
            "id-01",
            "--set",
            "ports.0.connected_to.ip=10.0.0.254",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Device updated"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_requires_yes_when_not_interactive() {
    let server = inventory(2).await;
    let output = switchyard_cmd()
        .args(["--api-url", &api_url(&server), "devices", "delete", "SW00"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("requires confirmation"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes() {
    let server = inventory(2).await;
    Mock::given(method("DELETE"))
        .and(path("/api/switches/id-00"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    switchyard_cmd()
        .args(["--api-url", &api_url(&server), "-y", "devices", "delete", "SW00"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Device deleted"));
}

//! Integration tests for the resctl CLI
//!
//! These tests exercise the binary end-to-end using assert_cmd. None of them
//! reach a real API server: every case fails or finishes before the first
//! request, or targets a closed local port.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a resctl command isolated from the user's config and environment
fn resctl(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("resctl").unwrap();
    cmd.env("RESCTL_CONFIG", config_dir.path().join("config.yaml"))
        .env_remove("RESCTL_API_URL")
        .env_remove("RESCTL_TOKEN")
        .env_remove("RESCTL_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_lists_resources_and_builtins() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("organization"))
        .stdout(predicate::str::contains("workspace"))
        .stdout(predicate::str::contains("variable"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_version() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_resource_help_lists_operations() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["variable", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_create_help_shows_field_flags() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["workspace", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--organization-name"))
        .stdout(predicate::str::contains("--iac-version"))
        .stdout(predicate::str::contains("--branch"));
}

// ============================================================================
// Argument and Flag Errors
// ============================================================================

#[test]
fn test_unknown_output_format_fails() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["-o", "xml", "organization", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported output format: xml"));
}

#[test]
fn test_unknown_output_format_from_env_fails() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .env("RESCTL_OUTPUT", "xml")
        .args(["organization", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported output format: xml"));
}

#[test]
fn test_get_requires_id() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["organization", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_create_requires_required_fields() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["module", "create", "--organization-id=o-1", "--name=vpc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--provider"));
}

#[test]
fn test_missing_parent_is_reported_once() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["workspace", "list"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("either --organization-id or --organization-name is required")
                .count(1),
        );
}

#[test]
fn test_unreachable_server_fails() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["--api-url", "http://127.0.0.1:9", "organization", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("request GET /api/v1/organization failed").count(1))
        .stderr(predicate::str::contains("error sending request").count(1));
}

#[test]
fn test_invalid_config_file_reported_once() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.yaml"), "api_url: [unclosed\n").unwrap();

    resctl(&tmp)
        .args(["organization", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file").count(1));
}

// ============================================================================
// Config Command
// ============================================================================

#[test]
fn test_config_path_honours_env() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_set_show_unset() {
    let tmp = TempDir::new().unwrap();

    resctl(&tmp)
        .args(["config", "set", "api_url", "https://api.example.com"])
        .assert()
        .success();

    let written = fs::read_to_string(tmp.path().join("config.yaml")).unwrap();
    assert!(written.contains("api_url"));
    assert!(written.contains("https://api.example.com"));

    resctl(&tmp)
        .args(["config", "show", "api_url"])
        .assert()
        .success()
        .stdout("https://api.example.com\n");

    resctl(&tmp)
        .args(["config", "unset", "api_url"])
        .assert()
        .success();

    resctl(&tmp)
        .args(["config", "show", "api_url"])
        .assert()
        .success()
        .stdout("http://localhost:8080\n");
}

#[test]
fn test_config_show_masks_token() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.yaml"), "token: abcdef123456\n").unwrap();

    resctl(&tmp)
        .args(["config", "show", "token"])
        .assert()
        .success()
        .stdout("****3456\n");
}

#[test]
fn test_config_set_rejects_bad_output() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["config", "set", "output", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported output format: xml"));

    assert!(!tmp.path().join("config.yaml").exists());
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["config", "set", "editor", "vi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key 'editor'"));
}

#[test]
fn test_config_keys() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url"))
        .stdout(predicate::str::contains("token"))
        .stdout(predicate::str::contains("output"));
}

#[test]
fn test_output_from_config_file_is_validated() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.yaml"), "output: xml\n").unwrap();

    resctl(&tmp)
        .args(["organization", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported output format: xml"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_cover_resources() {
    let tmp = TempDir::new().unwrap();
    resctl(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("organization"))
        .stdout(predicate::str::contains("variable"));
}

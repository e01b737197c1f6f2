#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the theraway-server binary.

use std::process::{Command, Stdio};

use tempfile::TempDir;

fn run_theraway_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_theraway-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute theraway-server")
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_theraway_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--print-config"));
}

#[test]
fn test_cli_version_command() {
    let output = run_theraway_server(&["--version"]);
    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("theraway-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_theraway_server(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report the error: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_theraway_server(&["-c", "/nonexistent/config.yaml", "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "Should indicate config file not found: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "invalid.yaml", "invalid: yaml: content: [unclosed");

    let output = run_theraway_server(&["--config", &path, "check"]);
    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("configuration"),
        "Should mention the configuration: {stderr}"
    );
}

#[test]
fn test_cli_check_valid_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        "valid.yaml",
        r#"
server:
  bind_addr: "0.0.0.0"
  port: 9001
logging:
  level: warn
discovery:
  grid_items_per_page: 12
marketplace:
  max_image_mb: 8
"#,
    );

    let output = run_theraway_server(&["--config", &path, "check"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("9001"));
}

#[test]
fn test_cli_check_rejects_bad_bind_address() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        "bad_addr.yaml",
        "server:\n  bind_addr: \"not an address\"\n",
    );

    let output = run_theraway_server(&["--config", &path, "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("address"), "Should mention the address: {stderr}");
}

#[test]
fn test_cli_unknown_config_key_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "typo.yaml", "marketplace:\n  max_imgae_mb: 3\n");

    let output = run_theraway_server(&["--config", &path, "check"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_print_config_applies_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "print.yaml", "server:\n  port: 9001\n");

    let output = run_theraway_server(&["--config", &path, "--port", "9555", "-vv", "--print-config"]);
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["server"]["port"], 9555);
    assert_eq!(config["logging"]["level"], "debug");
    assert_eq!(config["discovery"]["grid_page_size"], 27);
    assert_eq!(config["marketplace"]["default_locale"], "en");
}

#[test]
fn test_cli_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "env.yaml", "server:\n  port: 9001\n");

    let output = Command::new(env!("CARGO_BIN_EXE_theraway-server"))
        .args(["--config", &path, "--print-config"])
        .env("THERAWAY__SERVER__PORT", "9777")
        .env("THERAWAY__MARKETPLACE__MAX_VIDEO_MB", "100")
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["server"]["port"], 9777);
    assert_eq!(config["marketplace"]["max_video_mb"], 100);
}

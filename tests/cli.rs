//! CLI argument and local-failure tests — no network I/O.
//!
//! Every failure exercised here fires before any outbound call would be made.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("reviver").unwrap()
}

#[test]
fn missing_input_exits_with_usage_error() {
    cmd().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_input_reports_read_error() {
    // A fake key gets past the context setup; the read failure fires before
    // any request is built.
    cmd()
        .env("GEMINI_API_KEY", "test-key")
        .env_remove("REVIVER_REPLAY")
        .args(["--config", "/nonexistent/reviver.toml", "/nonexistent/photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read the image file"));
}

#[test]
fn missing_api_key_exits_with_error() {
    cmd()
        .env_remove("GEMINI_API_KEY")
        .env_remove("REVIVER_REPLAY")
        .env_remove("REVIVER_REC")
        .args(["--config", "/nonexistent/reviver.toml", "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key for Gemini"));
}

#[test]
fn malformed_config_exits_with_error() {
    let dir = std::env::temp_dir().join("reviver_cli_badconfig");
    std::fs::create_dir_all(&dir).unwrap();
    let config = dir.join("bad.toml");
    std::fs::write(&config, "not valid toml {{{").unwrap();

    cmd()
        .env("GEMINI_API_KEY", "test-key")
        .args(["--config", config.to_str().unwrap(), "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));

    let _ = std::fs::remove_dir_all(&dir);
}

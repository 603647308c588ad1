//! CLI behaviour that does not need a running server.

#![allow(deprecated)] // Command::cargo_bin is deprecated in newer assert_cmd releases

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("courses-cli").unwrap();
    cmd.env_remove("COURSES_ENV")
        .env("COURSES_CONFIG_DIR", std::env::temp_dir().join("courses-cli-no-config"));
    cmd
}

#[test]
fn help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("settings"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn serve_help_shows_overrides() {
    cli()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn settings_prints_defaults() {
    cli()
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 4000"))
        .stdout(predicate::str::contains("\"id_strategy\": \"random\""));
}

#[test]
fn settings_honours_environment_overrides() {
    cli()
        .arg("settings")
        .env("COURSES__SERVER__PORT", "5055")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 5055"));
}

#[test]
fn seed_prints_catalogue() {
    cli()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ReactJs\""))
        .stdout(predicate::str::contains("https://www.djangoproject.com/"));
}

#[test]
fn unknown_environment_fails() {
    cli()
        .arg("settings")
        .env("COURSES_ENV", "qa")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported environment"));
}

#[test]
fn missing_subcommand_fails() {
    cli().assert().failure();
}

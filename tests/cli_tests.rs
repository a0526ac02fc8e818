//! End-to-end CLI tests for teletolo.
//!
//! These run the actual binary and check its observable behavior without
//! any network action: help output, dry-run, and configuration errors.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn teletolo() -> Command {
    Command::cargo_bin("teletolo").expect("binary builds")
}

#[test]
fn help_lists_recognized_options() {
    teletolo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--days-back"))
        .stdout(predicate::str::contains("--append-to-journal"))
        .stdout(predicate::str::contains("--delete-after-download"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--block-fmt"));
}

#[test]
fn version_prints() {
    teletolo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("teletolo"));
}

#[test]
fn missing_credentials_fail_before_any_action() {
    let dir = tempdir().unwrap();
    teletolo()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bot_token"));
}

#[test]
fn dry_run_validates_and_stops() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("teletolo.toml"),
        "bot_token = \"123:abc\"\nchannel_id = \"@notes\"\n",
    )
    .unwrap();

    teletolo()
        .current_dir(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY MODE. No action performed"))
        .stdout(predicate::str::contains("'@notes' Telegram channel"));

    // nothing written
    assert!(!dir.path().join("journals").exists());
}

#[test]
fn dry_run_reports_intended_mode() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("teletolo.toml"), "bot_token = \"123:abc\"\n").unwrap();

    teletolo()
        .current_dir(dir.path())
        .args(["--dry-run", "--append-to-journal", "--delete-after-download"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appended to journal files"))
        .stdout(predicate::str::contains(
            "deleted from the Telegram channel after download completes",
        ));
}

#[test]
fn cli_token_overrides_missing_config_file() {
    let dir = tempdir().unwrap();
    teletolo()
        .current_dir(dir.path())
        .args(["--bot-token", "123:abc", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY MODE"));
}

#[test]
fn broken_config_file_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("teletolo.toml"), "this is not toml = = =").unwrap();

    teletolo()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file"));
}

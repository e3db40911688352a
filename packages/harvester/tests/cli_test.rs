//! CLI-level tests for the harvester binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_harvest_command() {
    let mut cmd = Command::cargo_bin("geosync-harvester").expect("binary exists");

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("harvest"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("geosync-harvester").expect("binary exists");

    cmd.arg("publish").assert().failure();
}

#[test]
fn test_harvest_rejects_invalid_base_url() {
    let mut cmd = Command::cargo_bin("geosync-harvester").expect("binary exists");

    cmd.args(["harvest", "--base-url", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}

#[test]
fn test_harvest_rejects_invalid_service() {
    let mut cmd = Command::cargo_bin("geosync-harvester").expect("binary exists");

    cmd.args(["harvest", "--service", "ftp"]).assert().failure();
}

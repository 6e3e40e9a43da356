//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("localhub").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Business directory"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("localhub").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("localhub").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("schema migrations"));
}

#[test]
fn test_dedupe_help() {
    let mut cmd = Command::cargo_bin("localhub").unwrap();
    cmd.arg("dedupe").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("duplicate"));
}

#[test]
fn test_dedupe_rejects_unknown_kind() {
    let mut cmd = Command::cargo_bin("localhub").unwrap();
    cmd.arg("dedupe").arg("vendors");

    cmd.assert().failure();
}

#[test]
fn test_reconcile_help() {
    let mut cmd = Command::cargo_bin("localhub").unwrap();
    cmd.arg("reconcile").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Base URL"));
}

#[test]
fn test_reset_password_requires_email() {
    let mut cmd = Command::cargo_bin("localhub").unwrap();
    cmd.arg("reset-password");

    cmd.assert().failure();
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("localhub").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("localhub"));
}

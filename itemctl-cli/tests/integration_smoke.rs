//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("itemctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("itemctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--db-host"));
}

#[test]
fn test_init_db_help() {
    let mut cmd = Command::cargo_bin("itemctl").unwrap();
    cmd.arg("init-db").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Connection attempts before giving up"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    let mut cmd = Command::cargo_bin("itemctl").unwrap();
    cmd.arg("serve").arg("--bind").arg("not-an-address");

    cmd.assert().failure();
}

#[test]
fn test_init_db_fails_when_store_unreachable() {
    let mut cmd = Command::cargo_bin("itemctl").unwrap();
    cmd.args([
        "init-db",
        "--db-host",
        "127.0.0.1",
        "--db-port",
        "1",
        "--connect-attempts",
        "1",
        "--connect-delay-secs",
        "0",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect"));
}

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_connection_flags() {
    Command::cargo_bin("wirelog")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--secure"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("automatic reconnect"));
}

#[test]
fn test_version_prints_binary_name() {
    Command::cargo_bin("wirelog")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wirelog"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    Command::cargo_bin("wirelog")
        .unwrap()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

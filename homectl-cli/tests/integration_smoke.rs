//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn homectl(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("homectl").unwrap();
    // keep the user's ~/.homectl out of the tests
    cmd.env("HOME", home)
        .env_remove("HOMECTL_CONFIG")
        .env_remove("HOMECTL_DATABASE")
        .env_remove("HOMECTL_POLL_INTERVAL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_serve_help() {
    let home = tempfile::tempdir().unwrap();
    homectl(home.path())
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seconds between polling cycles"));
}

#[test]
fn test_poll_help() {
    let home = tempfile::tempdir().unwrap();
    homectl(home.path())
        .arg("poll")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Only poll this sensor id"));
}

#[test]
fn test_config_show_defaults() {
    let home = tempfile::tempdir().unwrap();
    homectl(home.path())
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("poll_interval_secs = 60"));
}

#[test]
fn test_config_file_is_used() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("custom.toml");
    std::fs::write(&path, "poll_interval_secs = 90\n").unwrap();

    homectl(home.path())
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("poll_interval_secs = 90"));
}

#[test]
fn test_invalid_config_fails() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("bad.toml");
    std::fs::write(&path, "poll_interval_secs = \"often\"\n").unwrap();

    homectl(home.path())
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid TOML"));
}

#[test]
fn test_poll_empty_database() {
    let home = tempfile::tempdir().unwrap();
    let db = home.path().join("homectl.db");

    homectl(home.path())
        .arg("poll")
        .arg("--database")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Polled 0 sensors"));

    assert!(db.exists());
}

#[test]
fn test_broken_env_file_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join(".homectl");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(".env"), "not a valid line\n").unwrap();

    homectl(home.path())
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("failed to load env file"));
}

use crate::support::{relata, setup_test_dir};
use predicates::prelude::*;

#[test]
fn test_verbose_shows_debug_messages() {
    let dir = setup_test_dir();

    relata()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("RELATA_LOG")
        .args(["--verbose", "status"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_default_level_hides_debug_messages() {
    let dir = setup_test_dir();

    relata()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("RELATA_LOG")
        .arg("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args").not());
}

#[test]
fn test_log_json_emits_json_lines() {
    let dir = setup_test_dir();

    relata()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("RELATA_LOG")
        .args(["--log-json", "--log-level", "debug", "status"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"parse_args\""));
}

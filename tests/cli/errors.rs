use crate::support::relata;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_missing_store_is_data_error() {
    let dir = tempdir().unwrap();

    relata()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}

#[test]
fn test_missing_store_json_envelope() {
    let dir = tempdir().unwrap();

    let output = relata()
        .current_dir(dir.path())
        .args(["--format", "json", "status"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "store_not_found");
    assert_eq!(json["error"]["code"], 3);
}

#[test]
fn test_bad_flag_json_envelope() {
    let output = relata()
        .args(["--format", "json", "rank", "--top-k", "many"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_invalid_config_is_data_error() {
    let dir = tempdir().unwrap();
    relata().current_dir(dir.path()).arg("init").assert().success();
    std::fs::write(
        dir.path().join(".relata/config.toml"),
        "[ranking]\ntop_k = 0\n",
    )
    .unwrap();

    relata()
        .current_dir(dir.path())
        .arg("rank")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid config ranking.top_k"));
}

#[test]
fn test_quiet_suppresses_error_message() {
    let dir = tempdir().unwrap();

    relata()
        .current_dir(dir.path())
        .args(["--quiet", "status"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}

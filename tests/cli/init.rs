use crate::support::{relata, run_json};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();

    relata()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized relata store"));

    assert!(dir.path().join(".relata/config.toml").exists());
    assert!(dir.path().join(".relata/relata.db").exists());
}

#[test]
fn test_init_is_idempotent() {
    let dir = tempdir().unwrap();

    relata().current_dir(dir.path()).arg("init").assert().success();
    std::fs::write(
        dir.path().join(".relata/config.toml"),
        "[ranking]\ntop_k = 2\n",
    )
    .unwrap();
    relata().current_dir(dir.path()).arg("init").assert().success();

    let content = std::fs::read_to_string(dir.path().join(".relata/config.toml")).unwrap();
    assert!(content.contains("top_k = 2"));
}

#[test]
fn test_init_with_explicit_store_path() {
    let dir = tempdir().unwrap();

    relata()
        .current_dir(dir.path())
        .args(["--store", "data/related", "init"])
        .assert()
        .success();

    assert!(dir.path().join("data/related/relata.db").exists());

    relata()
        .current_dir(dir.path())
        .args(["--store", "data/related", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published items: 0"));
}

#[test]
fn test_init_json_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let json = run_json(&dir, &["init"]);
    assert_eq!(json["status"], "ok");
    assert!(json["store"].as_str().unwrap().ends_with(".relata"));
}

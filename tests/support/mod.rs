use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a Command for relata
pub fn relata() -> Command {
    cargo_bin_cmd!("relata")
}

/// Setup a test store and return the directory only
#[allow(dead_code)]
pub fn setup_test_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    relata()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

/// Write a snapshot file into the directory and return its path
#[allow(dead_code)]
pub fn write_snapshot(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Setup a store loaded with the sample export
#[allow(dead_code)]
pub fn setup_loaded_store() -> TempDir {
    let dir = setup_test_dir();
    write_snapshot(dir.path(), "export.json", SAMPLE_EXPORT);
    relata()
        .current_dir(dir.path())
        .args(["load", "export.json"])
        .assert()
        .success();
    dir
}

/// Run relata and return stdout as String
#[allow(dead_code)]
pub fn run_and_get_stdout(dir: &TempDir, args: &[&str]) -> String {
    let output = relata().current_dir(dir.path()).args(args).output().unwrap();
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run relata with `--format json` and parse stdout
#[allow(dead_code)]
pub fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--format", "json"];
    full.extend_from_slice(args);
    let stdout = run_and_get_stdout(dir, &full);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, stdout))
}

/// Posts export in the CMS REST list shape.
///
/// post-a / post-b share "news" and are two days apart (score 8);
/// post-c shares nothing and is months later; post-d is a draft.
#[allow(dead_code)]
pub const SAMPLE_EXPORT: &str = r#"{
  "docs": [
    {
      "id": "post-a",
      "title": "Spring launch",
      "categories": [{"id": "news", "title": "News"}, {"id": "launch"}],
      "publishedAt": "2024-01-01T00:00:00.000Z",
      "_status": "published"
    },
    {
      "id": "post-b",
      "title": "Launch recap",
      "categories": ["news"],
      "publishedAt": "2024-01-03T00:00:00.000Z",
      "_status": "published"
    },
    {
      "id": "post-c",
      "title": "Summer hours",
      "categories": ["office"],
      "publishedAt": "2024-06-01T00:00:00.000Z",
      "_status": "published"
    },
    {
      "id": "post-d",
      "title": "Upcoming launch",
      "categories": ["news", "launch"],
      "_status": "draft"
    }
  ],
  "totalDocs": 4
}"#;

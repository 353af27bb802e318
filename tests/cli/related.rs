use crate::support::{relata, run_json, setup_loaded_store};
use predicates::prelude::*;

#[test]
fn test_related_before_rank_is_empty() {
    let dir = setup_loaded_store();

    relata()
        .current_dir(dir.path())
        .args(["related", "post-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No related items for post-a"));
}

#[test]
fn test_related_preview_includes_scores() {
    let dir = setup_loaded_store();

    let json = run_json(&dir, &["related", "post-d", "--preview"]);
    assert_eq!(json["preview"], true);
    assert_eq!(json["related"][0]["id"], "post-a");
    assert_eq!(json["related"][0]["score"], 6);
    assert_eq!(json["related"][1]["id"], "post-b");
    assert_eq!(json["related"][1]["score"], 3);
}

#[test]
fn test_related_preview_limit() {
    let dir = setup_loaded_store();

    let json = run_json(&dir, &["related", "post-d", "--preview", "--limit", "1"]);
    assert_eq!(json["related"].as_array().unwrap().len(), 1);
}

#[test]
fn test_related_unknown_item() {
    let dir = setup_loaded_store();

    relata()
        .current_dir(dir.path())
        .args(["related", "missing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("content item not found: missing"));
}

#[test]
fn test_related_limit_requires_preview() {
    let dir = setup_loaded_store();

    relata()
        .current_dir(dir.path())
        .args(["related", "post-a", "--limit", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--limit only applies with --preview"));
}

use crate::support::{relata, run_and_get_stdout, run_json, setup_loaded_store};
use predicates::prelude::*;

#[test]
fn test_rank_persists_lists() {
    let dir = setup_loaded_store();

    relata()
        .current_dir(dir.path())
        .arg("rank")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Ranked 3 item(s): 3 written, 1 without suggestions, 0 failed",
        ));

    let a = run_json(&dir, &["related", "post-a"]);
    assert_eq!(a["related"].as_array().unwrap().len(), 1);
    assert_eq!(a["related"][0]["id"], "post-b");
    assert_eq!(a["related"][0]["title"], "Launch recap");

    let c = run_json(&dir, &["related", "post-c"]);
    assert!(c["related"].as_array().unwrap().is_empty());

    // drafts are not owners by default
    let d = run_json(&dir, &["related", "post-d"]);
    assert!(d["related"].as_array().unwrap().is_empty());
}

#[test]
fn test_rank_with_drafts() {
    let dir = setup_loaded_store();

    relata()
        .current_dir(dir.path())
        .args(["rank", "--drafts"])
        .assert()
        .success();

    let d = run_json(&dir, &["related", "post-d"]);
    let ids: Vec<&str> = d["related"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["post-a", "post-b"]);

    // the draft never shows up as a suggestion
    let a = run_json(&dir, &["related", "post-a"]);
    assert!(a["related"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["id"] != "post-d"));
}

#[test]
fn test_rank_dry_run_writes_nothing() {
    let dir = setup_loaded_store();

    relata()
        .current_dir(dir.path())
        .args(["rank", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ranked (dry run)"))
        .stdout(predicate::str::contains("post-a -> [post-b]"));

    let status = run_json(&dir, &["status"]);
    assert_eq!(status["stats"]["with_related"], 0);
    assert!(status["stats"]["last_ranked_at"].is_null());
}

#[test]
fn test_rank_top_k_zero_clears_lists() {
    let dir = setup_loaded_store();

    relata().current_dir(dir.path()).arg("rank").assert().success();
    relata()
        .current_dir(dir.path())
        .args(["rank", "--top-k", "0"])
        .assert()
        .success();

    let status = run_json(&dir, &["status"]);
    assert_eq!(status["stats"]["with_related"], 0);
}

#[test]
fn test_rank_max_items_reports_partial_run() {
    let dir = setup_loaded_store();

    let json = run_json(&dir, &["rank", "--max-items", "1"]);
    assert_eq!(json["report"]["processed"], 1);
    assert_eq!(json["report"]["truncated"], true);

    let status = run_json(&dir, &["status"]);
    assert!(status["stats"]["last_ranked_at"].is_null());
}

#[test]
fn test_rank_is_idempotent() {
    let dir = setup_loaded_store();

    relata().current_dir(dir.path()).arg("rank").assert().success();
    let first = run_and_get_stdout(&dir, &["--format", "records", "related", "post-a"]);

    relata().current_dir(dir.path()).arg("rank").assert().success();
    let second = run_and_get_stdout(&dir, &["--format", "records", "related", "post-a"]);

    assert_eq!(first, second);
    assert!(first.contains("R post-a post-b position=0"));
}

#[test]
fn test_rank_records_output() {
    let dir = setup_loaded_store();

    relata()
        .current_dir(dir.path())
        .args(["--format", "records", "rank"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode=rank top_k=10 processed=3 written=3"))
        .stdout(predicate::str::contains("R post-b post-a position=0"));
}

#[test]
fn test_rank_uses_configured_top_k() {
    let dir = setup_loaded_store();
    std::fs::write(
        dir.path().join(".relata/config.toml"),
        "[ranking]\ntop_k = 1\nsuggest_for_drafts = true\n",
    )
    .unwrap();

    let json = run_json(&dir, &["rank"]);
    assert_eq!(json["top_k"], 1);
    assert_eq!(json["report"]["processed"], 4);

    let d = run_json(&dir, &["related", "post-d"]);
    assert_eq!(d["related"].as_array().unwrap().len(), 1);
}

#[test]
fn test_status_after_rank() {
    let dir = setup_loaded_store();
    relata().current_dir(dir.path()).arg("rank").assert().success();

    let status = run_json(&dir, &["status"]);
    assert_eq!(status["stats"]["published"], 3);
    assert_eq!(status["stats"]["drafts"], 1);
    assert_eq!(status["stats"]["with_related"], 2);
    assert!(status["stats"]["last_ranked_at"].is_string());
}

#[test]
fn test_rank_rows_in_database() {
    let dir = setup_loaded_store();
    relata()
        .current_dir(dir.path())
        .args(["rank", "--drafts"])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(dir.path().join(".relata/relata.db")).unwrap();
    let mut stmt = conn
        .prepare("SELECT target_id FROM related_items WHERE owner_id = ?1 ORDER BY position")
        .unwrap();
    let targets: Vec<String> = stmt
        .query_map(["post-d"], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(targets, vec!["post-a", "post-b"]);
}

#[test]
fn test_unpublished_item_list_is_cleared() {
    let dir = setup_loaded_store();
    relata().current_dir(dir.path()).arg("rank").assert().success();

    crate::support::write_snapshot(
        dir.path(),
        "unpublish.json",
        r#"[{"id": "post-a", "categories": ["news", "launch"], "_status": "draft"}]"#,
    );
    relata()
        .current_dir(dir.path())
        .args(["load", "unpublish.json"])
        .assert()
        .success();

    let json = run_json(&dir, &["rank"]);
    assert_eq!(json["report"]["cleared"], 2);

    let a = run_json(&dir, &["related", "post-a"]);
    assert!(a["related"].as_array().unwrap().is_empty());
    // post-b no longer points at the draft
    let b = run_json(&dir, &["related", "post-b"]);
    assert!(b["related"].as_array().unwrap().is_empty());
}

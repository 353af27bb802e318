use crate::support::{
    relata, run_json, setup_loaded_store, setup_test_dir, write_snapshot, SAMPLE_EXPORT,
};
use predicates::prelude::*;

#[test]
fn test_load_reports_counts() {
    let dir = setup_test_dir();
    write_snapshot(dir.path(), "export.json", SAMPLE_EXPORT);

    relata()
        .current_dir(dir.path())
        .args(["load", "export.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Loaded 4 item(s) from",
        ))
        .stdout(predicate::str::contains("3 published, 1 draft"));
}

#[test]
fn test_load_rejects_records_without_id() {
    let dir = setup_test_dir();
    write_snapshot(
        dir.path(),
        "export.json",
        r#"[{"title": "orphan"}, {"id": "ok-1", "categories": ["x"]}]"#,
    );

    let json = run_json(&dir, &["load", "export.json"]);
    assert_eq!(json["loaded"], 1);
    assert_eq!(json["rejected"][0]["index"], 0);
    assert_eq!(json["rejected"][0]["reason"], "missing id");
}

#[test]
fn test_load_yaml_snapshot() {
    let dir = setup_test_dir();
    write_snapshot(
        dir.path(),
        "export.yaml",
        "- id: y-1\n  categories: [x]\n- id: y-2\n  categories: [x]\n",
    );

    relata()
        .current_dir(dir.path())
        .args(["load", "export.yaml"])
        .assert()
        .success();

    relata()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Published items: 2"));
}

#[test]
fn test_load_unsupported_extension_is_usage_error() {
    let dir = setup_test_dir();
    write_snapshot(dir.path(), "export.csv", "id\n1\n");

    relata()
        .current_dir(dir.path())
        .args(["load", "export.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported snapshot extension"));
}

#[test]
fn test_load_invalid_shape_is_data_error() {
    let dir = setup_test_dir();
    write_snapshot(dir.path(), "export.json", r#"{"items": []}"#);

    relata()
        .current_dir(dir.path())
        .args(["load", "export.json"])
        .assert()
        .code(3);
}

#[test]
fn test_reload_replaces_categories() {
    let dir = setup_test_dir();
    write_snapshot(dir.path(), "v1.json", r#"[{"id": "a", "categories": ["x"]}, {"id": "b", "categories": ["x"]}]"#);
    write_snapshot(dir.path(), "v2.json", r#"[{"id": "a", "categories": ["y"]}]"#);

    relata().current_dir(dir.path()).args(["load", "v1.json"]).assert().success();
    relata().current_dir(dir.path()).args(["load", "v2.json"]).assert().success();

    let json = run_json(&dir, &["score", "a", "b"]);
    assert_eq!(json["breakdown"]["shared_categories"], 0);
}

#[test]
fn test_load_replace_removes_missing_items() {
    let dir = setup_loaded_store();
    relata().current_dir(dir.path()).arg("rank").assert().success();

    write_snapshot(
        dir.path(),
        "fresh.json",
        r#"[
            {"id": "post-a", "title": "Spring launch", "categories": ["news", "launch"], "publishedAt": "2024-01-01"},
            {"id": "post-c", "title": "Summer hours", "categories": ["office"], "publishedAt": "2024-06-01"}
        ]"#,
    );

    let json = run_json(&dir, &["load", "fresh.json", "--replace"]);
    assert_eq!(json["loaded"], 2);
    assert_eq!(json["removed"], serde_json::json!(["post-b", "post-d"]));

    let status = run_json(&dir, &["status"]);
    assert_eq!(status["stats"]["published"], 2);
    assert_eq!(status["stats"]["drafts"], 0);

    let a = run_json(&dir, &["related", "post-a"]);
    assert!(a["related"].as_array().unwrap().is_empty());

    relata()
        .current_dir(dir.path())
        .args(["related", "post-b"])
        .assert()
        .code(3);
}

#[test]
fn test_load_without_replace_keeps_missing_items() {
    let dir = setup_loaded_store();
    write_snapshot(dir.path(), "one.json", r#"[{"id": "post-a"}]"#);

    let json = run_json(&dir, &["load", "one.json"]);
    assert_eq!(json["removed"], serde_json::json!([]));

    let status = run_json(&dir, &["status"]);
    assert_eq!(status["stats"]["published"], 3);
}

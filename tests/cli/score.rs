use crate::support::{relata, run_json, setup_loaded_store};
use predicates::prelude::*;

#[test]
fn test_score_breakdown() {
    let dir = setup_loaded_store();

    let json = run_json(&dir, &["score", "post-a", "post-b"]);
    assert_eq!(json["breakdown"]["shared_categories"], 1);
    assert_eq!(json["breakdown"]["category_points"], 3);
    assert_eq!(json["breakdown"]["day_gap"], 2);
    assert_eq!(json["breakdown"]["recency_points"], 5);
    assert_eq!(json["breakdown"]["total"], 8);
    assert_eq!(json["eligible"], true);
}

#[test]
fn test_score_is_symmetric() {
    let dir = setup_loaded_store();

    let ab = run_json(&dir, &["score", "post-a", "post-c"]);
    let ba = run_json(&dir, &["score", "post-c", "post-a"]);
    assert_eq!(ab["breakdown"]["total"], 0);
    assert_eq!(ab["breakdown"], ba["breakdown"]);
}

#[test]
fn test_score_human_output() {
    let dir = setup_loaded_store();

    relata()
        .current_dir(dir.path())
        .args(["score", "post-a", "post-d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring launch -> Upcoming launch: 6"))
        .stdout(predicate::str::contains("no publish date"))
        .stdout(predicate::str::contains("not eligible"));
}

#[test]
fn test_score_self_is_zero() {
    let dir = setup_loaded_store();

    let json = run_json(&dir, &["score", "post-a", "post-a"]);
    assert_eq!(json["breakdown"]["total"], 0);
    assert_eq!(json["eligible"], false);
}

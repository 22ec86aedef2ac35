//! Integration tests for `nv inspect` and `nv intersect`.

mod common;

use common::{TestEnv, stdout_json};
use predicates::prelude::*;

// === Inspect Tests ===

#[test]
fn test_inspect_reports_counts() {
    let env = TestEnv::with_networks();

    let output = env.nv().args(["inspect", "main.json"]).output().unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["title"], "liver");
    assert_eq!(json["nodes"], 4);
    assert_eq!(json["edges"], 2);
    assert_eq!(json["duplicates_dropped"], 1);
    assert_eq!(json["unconnected"], serde_json::json!(["p9"]));
    assert_eq!(json["components"], 2);
    assert_eq!(json["node_types"]["miRNA"], 1);
}

#[test]
fn test_inspect_human() {
    let env = TestEnv::with_networks();

    env.nv()
        .args(["inspect", "main.json", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Network: liver"))
        .stdout(predicate::str::contains("Unconnected: p9"));
}

#[test]
fn test_inspect_dangling_edge_fails() {
    let env = TestEnv::new();
    env.write(
        "bad.json",
        r#"{"title": "bad", "interactions": [{"source": "a", "target": "ghost"}],
            "nodes": [{"id": "a", "type": "gene"}]}"#,
    );

    env.nv()
        .args(["inspect", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_inspect_duplicate_node_fails() {
    let env = TestEnv::new();
    env.write(
        "dup.json",
        r#"{"title": "dup", "interactions": [],
            "nodes": [{"id": "a", "type": "gene"}, {"id": "a", "type": "probe"}]}"#,
    );

    env.nv()
        .args(["inspect", "dup.json", "-H"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_inspect_missing_file_fails_as_json() {
    let env = TestEnv::new();

    env.nv()
        .args(["inspect", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#"{"error": "#));
}

// === Intersect Tests ===

#[test]
fn test_intersect_lists_shared_nodes() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["intersect", "main.json", "side.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["count"], 2);
    assert_eq!(json["shared"], serde_json::json!(["m1", "r1"]));
    assert_eq!(json["main"], "liver");
    assert_eq!(json["side"], "kidney");
}

#[test]
fn test_intersect_disjoint_human() {
    let env = TestEnv::with_networks();
    env.write(
        "other.json",
        r#"{"title": "other", "interactions": [], "nodes": [{"id": "z", "type": "gene"}]}"#,
    );

    env.nv()
        .args(["intersect", "main.json", "other.json", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No nodes shared"));
}

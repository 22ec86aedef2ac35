//! Integration tests for `nv color` and `nv search`.

mod common;

use common::{TestEnv, stdout_json};
use predicates::prelude::*;

fn coloring<'a>(json: &'a serde_json::Value, id: &str) -> &'a serde_json::Value {
    json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == id)
        .unwrap()
}

// === Color Tests ===

#[test]
fn test_color_uses_observed_range() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["color", "main.json", "-w", "fold"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["min"], -2.0);
    assert_eq!(json["max"], 2.0);
    assert_eq!(json["threshold"], 0.0);
    assert_eq!(coloring(&json, "g1")["color"], "#0000ff");
    assert_eq!(coloring(&json, "m1")["color"], "#ff0000");
    assert_eq!(coloring(&json, "r1")["color"], "#ffffff");
    assert_eq!(coloring(&json, "r1")["border"], "#0000ff");
}

#[test]
fn test_color_custom_endpoints() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args([
            "color", "main.json", "-w", "fold", "--min", "-4", "--max", "4", "--neg", "#00ff00",
            "--pos", "#ff00ff",
        ])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["negative"], "#00ff00");
    assert_eq!(json["positive"], "#ff00ff");
    // -2 is halfway between -4 and the threshold 0
    assert_eq!(coloring(&json, "g1")["color"], "#7fff7f");
}

#[test]
fn test_color_low_end_alone_sets_complementary_high_end() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["color", "main.json", "-w", "fold", "--neg", "#00ff00"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["positive"], "#ff00ff");
    assert_eq!(coloring(&json, "m1")["color"], "#ff00ff");
}

#[test]
fn test_color_alternate_weight_for_mirna() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args([
            "color", "main.json", "-w", "fold", "--alt-type", "miRNA", "--alt-weight", "score",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(coloring(&json, "r1")["value"], 0.9);
}

#[test]
fn test_color_degenerate_range_fails() {
    let env = TestEnv::with_networks();

    env.nv()
        .args(["color", "main.json", "-w", "fold", "--min", "1", "--max", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_color_unknown_weight_fails() {
    let env = TestEnv::with_networks();

    env.nv()
        .args(["color", "main.json", "-w", "pvalue", "-H"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pvalue"));
}

#[test]
fn test_color_endpoints_from_config() {
    let env = TestEnv::with_networks();
    env.write_config("negative-color \"#00ffff\"\n");

    let output = env
        .nv()
        .args(["color", "main.json", "-w", "fold"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["negative"], "#00ffff");
    assert_eq!(coloring(&json, "g1")["color"], "#00ffff");
}

// === Search Tests ===

#[test]
fn test_search_selects_matching_labels() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["search", "main.json", "M"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["matches"], serde_json::json!(["m1"]));
    assert!(json.get("side_selection").is_none());
}

#[test]
fn test_search_is_case_sensitive() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["search", "main.json", "mdm"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["matches"], serde_json::json!([]));
}

#[test]
fn test_search_mirrors_into_side() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["search", "main.json", "miR", "--side", "side.json"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["matches"], serde_json::json!(["r1"]));
    assert_eq!(json["side_selection"], serde_json::json!(["r1"]));
}

#[test]
fn test_search_no_match_human() {
    let env = TestEnv::with_networks();

    env.nv()
        .args(["search", "main.json", "BRCA", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No labels contain 'BRCA'"));
}

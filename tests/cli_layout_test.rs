//! Integration tests for `nv layout` and `nv render`.

mod common;

use common::{TestEnv, stdout_json};
use predicates::prelude::*;

fn positions(json: &serde_json::Value, panel: usize) -> serde_json::Map<String, serde_json::Value> {
    json["panels"][panel]["positions"].as_object().unwrap().clone()
}

// === Layout Tests ===

#[test]
fn test_layout_single_skips_hidden_nodes() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["layout", "main.json", "-l", "grid"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["layout"], "grid");
    assert_eq!(json["dual"], false);
    let main = positions(&json, 0);
    assert_eq!(main.len(), 3);
    assert!(!main.contains_key("p9"));
}

#[test]
fn test_layout_show_hidden_includes_unconnected() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["layout", "main.json", "-l", "circle", "--show-hidden"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert!(positions(&json, 0).contains_key("p9"));
}

#[test]
fn test_layout_dual_places_shared_nodes_identically() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["layout", "main.json", "--side", "side.json", "-l", "circle"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["dual"], true);
    assert_eq!(json["panels"][1]["panel"], "side");

    let main = positions(&json, 0);
    let side = positions(&json, 1);
    for id in ["m1", "r1"] {
        assert_eq!(main[id], side[id], "{} should match across panels", id);
    }
    // Non-shared nodes sit to the right of the shared region
    let shared_right = main["m1"]["x"].as_f64().unwrap().max(main["r1"]["x"].as_f64().unwrap());
    assert!(main["g1"]["x"].as_f64().unwrap() > shared_right);
    assert!(side["m2"]["x"].as_f64().unwrap() > shared_right);
}

#[test]
fn test_layout_uses_configured_default() {
    let env = TestEnv::with_networks();
    env.write_config("default-layout \"concentric\"\n");

    env.nv()
        .args(["layout", "main.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""layout":"concentric""#));
}

#[test]
fn test_layout_writes_positions() {
    let env = TestEnv::with_networks();

    env.nv()
        .args(["layout", "main.json", "-l", "grid", "-o", "placed.json"])
        .assert()
        .success();

    let placed: serde_json::Value = serde_json::from_str(&env.read("placed.json")).unwrap();
    let nodes = placed["nodes"].as_array().unwrap();
    let g1 = nodes.iter().find(|n| n["id"] == "g1").unwrap();
    assert!(g1["position"]["x"].is_number());
    let p9 = nodes.iter().find(|n| n["id"] == "p9").unwrap();
    assert_eq!(p9["hidden"], true);
}

#[test]
fn test_layout_unknown_name_rejected() {
    let env = TestEnv::with_networks();

    env.nv()
        .args(["layout", "main.json", "-l", "spiral"])
        .assert()
        .failure();
}

// === Render Tests ===

#[test]
fn test_render_writes_svg() {
    let env = TestEnv::with_networks();

    let output = env
        .nv()
        .args(["render", "main.json", "-l", "grid", "-o", "net.svg"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["nodes_drawn"], 3);

    let svg = env.read("net.svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("MDM2"));
    assert!(svg.contains("miR-21"));
}

#[test]
fn test_render_human() {
    let env = TestEnv::with_networks();

    env.nv()
        .args(["render", "main.json", "-o", "net.svg", "--show-hidden", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 4 node(s)"));
}

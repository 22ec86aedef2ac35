//! Common test utilities for netviz integration tests.
//!
//! Provides `TestEnv`, a temporary directory holding network files and a
//! config.kdl that never touches the user's `~/.config/netviz/`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Main network: a gene-mRNA pair, a miRNA targeting the mRNA, one
/// unconnected probe and one duplicated interaction.
pub const MAIN_NETWORK: &str = r#"{
    "title": "liver",
    "interactions": [
        {"source": "g1", "target": "m1"},
        {"source": "r1", "target": "m1"},
        {"source": "g1", "target": "m1"}
    ],
    "nodes": [
        {"id": "g1", "type": "gene", "symbols": ["TP53"], "weight": {"fold": -2.0}},
        {"id": "m1", "type": "mRNA", "symbols": ["MDM2"], "weight": {"fold": 2.0}},
        {"id": "r1", "type": "miRNA", "symbols": ["miR-21"], "weight": {"fold": 0.0, "score": 0.9}},
        {"id": "p9", "type": "probe"}
    ]
}"#;

/// Side network sharing `m1` and `r1` with the main one.
pub const SIDE_NETWORK: &str = r#"{
    "title": "kidney",
    "interactions": [
        {"from": "r1", "to": "m1"},
        {"from": "m1", "to": "m2"}
    ],
    "nodes": [
        {"id": "m1", "type": "mRNA", "symbols": ["MDM2"]},
        {"id": "r1", "type": "miRNA", "symbols": ["miR-21"]},
        {"id": "m2", "type": "mRNA", "symbols": ["CDKN1A"]}
    ]
}"#;

/// An isolated directory for network files and configuration.
///
/// `nv()` points `NV_CONFIG` at `config.kdl` inside the directory, so tests
/// stay parallel-safe.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Create an environment holding `main.json` and `side.json`.
    pub fn with_networks() -> Self {
        let env = Self::new();
        env.write("main.json", MAIN_NETWORK);
        env.write("side.json", SIDE_NETWORK);
        env
    }

    /// Get a Command for the nv binary with isolated configuration.
    pub fn nv(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_nv"));
        cmd.current_dir(self.dir.path());
        cmd.env("NV_CONFIG", self.config_path());
        cmd.env_remove("NV_LOG");
        cmd
    }

    /// Write a file into the environment and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).unwrap();
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.kdl")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a command's stdout as JSON.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

//! netviz - Dual-panel biological network visualization core.
//!
//! This library provides the state machine behind one or two synchronized
//! network panels (layouts, hidden nodes, weight coloring, mirrored
//! selection, intersection and merge) along with the `nv` CLI that drives it
//! headlessly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod gui;
pub mod models;

/// Library-level error type for netviz operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Interaction {from} -> {to} references unknown node '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Degenerate color range: min and max are both {0}")]
    DegenerateRange(f64),

    #[error("No network loaded in the {0} panel")]
    NoNetwork(String),

    #[error("No side panel is open")]
    NoSidePanel,

    #[error("Invalid panel target: {0}")]
    InvalidTarget(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for netviz operations.
pub type Result<T> = std::result::Result<T, Error>;

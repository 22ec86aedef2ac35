//! Configuration for netviz.
//!
//! ## config.kdl - User preferences
//!
//! Located at (first match wins):
//! - `--config <path>`
//! - `NV_CONFIG` environment variable
//! - `~/.config/netviz/config.kdl`
//!
//! Contains:
//! - `default-layout` - Layout run by `nv layout` when none is given
//! - `fallback-layout` - Layout for non-shared nodes in a dual layout
//! - `highlight-color` - Fill of shared nodes while highlighting
//! - `negative-color` / `positive-color` - Weight scale endpoints
//! - `output-format` - "json" or "human"
//!
//! ## Precedence
//!
//! CLI flag > config file > defaults
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, DEFAULT_LAYOUT, Resolved, ResolvedSettings, ValueSource, load_settings,
    resolve_settings,
};
pub use schema::{OutputFormat, VizConfig, default_config_path};

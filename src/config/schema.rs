//! KDL schema for config.kdl.
//!
//! This module provides:
//! - The Rust struct representing the KDL schema
//! - Parsing from KDL format
//! - Validation
//! - Loading from disk

use crate::gui::shared::color::Color;
use crate::gui::shared::layout::LayoutName;
use crate::{Error, Result};
use kdl::KdlDocument;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// default-layout "force"      // layout `nv layout` runs when none is given
/// fallback-layout "grid"      // layout for non-shared nodes in a dual layout
/// highlight-color "#ffde4b"   // fill of shared nodes while highlighting
/// negative-color "#0000ff"    // low end of weight scales
/// positive-color "#ff0000"    // high end of weight scales
/// output-format "human"       // or "json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VizConfig {
    pub default_layout: Option<LayoutName>,
    pub fallback_layout: Option<LayoutName>,
    pub highlight_color: Option<Color>,
    pub negative_color: Option<Color>,
    pub positive_color: Option<Color>,
    pub output_format: Option<OutputFormat>,

    /// Entries present in the document that could not be understood
    #[serde(skip)]
    pub problems: Vec<String>,
}

fn first_string<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a str> {
    doc.get(name)?.entries().first()?.value().as_string()
}

impl VizConfig {
    /// Create an empty config with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message listing every invalid value.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut problems = self.problems.clone();
        if self.fallback_layout.is_some_and(|l| l.is_custom()) {
            problems.push("fallback-layout cannot be 'custom'".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    /// Parse config from a KDL document.
    ///
    /// Unparseable values are left unset and recorded for [`validate`](Self::validate).
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        for (key, slot) in [
            ("default-layout", &mut config.default_layout),
            ("fallback-layout", &mut config.fallback_layout),
        ] {
            if let Some(node) = doc.get(key) {
                match first_string(doc, key).and_then(LayoutName::parse) {
                    Some(layout) => *slot = Some(layout),
                    None => config
                        .problems
                        .push(format!("{} has an unknown layout: {}", key, node)),
                }
            }
        }

        for (key, slot) in [
            ("highlight-color", &mut config.highlight_color),
            ("negative-color", &mut config.negative_color),
            ("positive-color", &mut config.positive_color),
        ] {
            if let Some(node) = doc.get(key) {
                match first_string(doc, key).and_then(Color::parse) {
                    Some(color) => *slot = Some(color),
                    None => config
                        .problems
                        .push(format!("{} must be a #RRGGBB color: {}", key, node)),
                }
            }
        }

        if let Some(node) = doc.get("output-format") {
            match first_string(doc, "output-format").and_then(OutputFormat::parse) {
                Some(format) => config.output_format = Some(format),
                None => config
                    .problems
                    .push(format!("output-format must be json or human: {}", node)),
            }
        }

        config
    }

    /// Load config from a KDL file path.
    ///
    /// Returns an empty config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        let doc: KdlDocument = content.parse().map_err(|e| {
            Error::Config(format!("Failed to parse KDL in {}: {}", path.display(), e))
        })?;

        let config = Self::from_kdl(&doc);
        config
            .validate()
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Default location of config.kdl: `~/.config/netviz/config.kdl`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("netviz").join("config.kdl"))
}

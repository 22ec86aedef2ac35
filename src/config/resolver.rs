//! Precedence resolution for configuration.
//!
//! ## Config Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. config.kdl (`--config`, else `NV_CONFIG`, else `~/.config/netviz/config.kdl`)
//! 3. Built-in defaults

use super::schema::{OutputFormat, VizConfig, default_config_path};
use crate::Result;
use crate::gui::CoordinatorSettings;
use crate::gui::shared::color::Color;
use crate::gui::shared::layout::LayoutName;
use crate::gui::shared::theme;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Layout `nv layout` runs when none is given
pub const DEFAULT_LAYOUT: LayoutName = LayoutName::Force;

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from CLI flag
    CliFlag,
    /// Value from a config file
    ConfigFile(PathBuf),
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::ConfigFile(path) => write!(f, "config:{}", path.display()),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved settings with source tracking.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSettings {
    /// Config file consulted, if any
    pub config_path: Option<PathBuf>,
    pub default_layout: Resolved<LayoutName>,
    pub fallback_layout: Resolved<LayoutName>,
    pub highlight_color: Resolved<Color>,
    pub negative_color: Resolved<Color>,
    pub positive_color: Resolved<Color>,
    pub output_format: Resolved<OutputFormat>,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            config_path: None,
            default_layout: Resolved::new(DEFAULT_LAYOUT, ValueSource::Default),
            fallback_layout: Resolved::new(LayoutName::Grid, ValueSource::Default),
            highlight_color: Resolved::new(theme::panel::HIGHLIGHT, ValueSource::Default),
            negative_color: Resolved::new(theme::scale::NEGATIVE, ValueSource::Default),
            positive_color: Resolved::new(theme::scale::POSITIVE, ValueSource::Default),
            output_format: Resolved::new(OutputFormat::Json, ValueSource::Default),
        }
    }
}

impl ResolvedSettings {
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    /// Settings for a dual-panel coordinator
    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            highlight_color: self.highlight_color.value,
            fallback_layout: self.fallback_layout.value,
        }
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub default_layout: Option<LayoutName>,
    pub negative_color: Option<Color>,
    pub positive_color: Option<Color>,
    pub output_format: Option<OutputFormat>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_layout(mut self, layout: LayoutName) -> Self {
        self.default_layout = Some(layout);
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }
}

fn pick<T: Copy>(cli: Option<T>, file: Option<T>, path: Option<&Path>, default: Resolved<T>) -> Resolved<T> {
    if let Some(value) = cli {
        return Resolved::new(value, ValueSource::CliFlag);
    }
    match (file, path) {
        (Some(value), Some(path)) => Resolved::new(value, ValueSource::ConfigFile(path.to_path_buf())),
        _ => default,
    }
}

/// Resolve settings from an already loaded config.
///
/// `path` is the file `config` was read from, used for source tracking.
pub fn resolve_settings(
    config: &VizConfig,
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> ResolvedSettings {
    let defaults = ResolvedSettings::default();
    ResolvedSettings {
        config_path: path.map(Path::to_path_buf),
        default_layout: pick(
            overrides.default_layout,
            config.default_layout,
            path,
            defaults.default_layout,
        ),
        fallback_layout: pick(None, config.fallback_layout, path, defaults.fallback_layout),
        highlight_color: pick(None, config.highlight_color, path, defaults.highlight_color),
        negative_color: pick(
            overrides.negative_color,
            config.negative_color,
            path,
            defaults.negative_color,
        ),
        positive_color: pick(
            overrides.positive_color,
            config.positive_color,
            path,
            defaults.positive_color,
        ),
        output_format: pick(
            overrides.output_format,
            config.output_format,
            path,
            defaults.output_format,
        ),
    }
}

/// Load config.kdl and resolve settings with full precedence chain.
///
/// `explicit` is the `--config` / `NV_CONFIG` path; without it the default
/// location is used when one exists for this platform.
pub fn load_settings(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<ResolvedSettings> {
    let path = explicit.map(Path::to_path_buf).or_else(default_config_path);
    let config = match &path {
        Some(path) => VizConfig::load(path)?,
        None => VizConfig::new(),
    };
    tracing::debug!(path = ?path, "Resolved config location");
    Ok(resolve_settings(&config, path.as_deref(), overrides))
}

//! Command implementations for the netviz CLI.
//!
//! Every command loads host-shaped network JSON, drives the panel state
//! machine against in-memory surfaces, and returns a result that prints as
//! JSON or human-readable text.

use crate::config::ResolvedSettings;
use crate::gui::shared::color::{Color, WeightRange, hue_palette};
use crate::gui::shared::layout::{LayoutName, Position};
use crate::gui::shared::render::{SnapshotStyle, elements_to_svg};
use crate::gui::{
    ColorByWeight, DualPanelCoordinator, HeadlessSurface, NodeColoring, PanelId, PanelTarget,
};
use crate::models::{Network, NetworkData, NodeType};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

/// Read and validate a network JSON file.
pub fn load_network(path: &Path) -> Result<Network> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::InvalidInput(format!("Failed to read {}: {}", path.display(), e)))?;
    let network = Network::from_json(&content)?;
    tracing::debug!(path = %path.display(), nodes = network.len(), "Loaded network");
    Ok(network)
}

fn write_network(path: &Path, data: &NetworkData) -> Result<()> {
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "Wrote network");
    Ok(())
}

fn coordinator(settings: &ResolvedSettings) -> DualPanelCoordinator<HeadlessSurface> {
    DualPanelCoordinator::with_settings(HeadlessSurface::new(), settings.coordinator_settings())
}

fn open_pair(
    main: &Path,
    side: &Path,
    settings: &ResolvedSettings,
) -> Result<DualPanelCoordinator<HeadlessSurface>> {
    let mut coord = coordinator(settings);
    coord.load(PanelId::Main, load_network(main)?)?;
    coord.open_side(HeadlessSurface::new(), load_network(side)?);
    Ok(coord)
}

// === inspect ===

#[derive(Serialize)]
pub struct InspectResult {
    pub title: String,
    pub nodes: usize,
    pub edges: usize,
    pub duplicates_dropped: usize,
    pub node_types: BTreeMap<String, usize>,
    pub unconnected: Vec<String>,
    pub components: usize,
}

impl Output for InspectResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Network: {}", self.title),
            format!("  Nodes: {}", self.nodes),
            format!("  Interactions: {}", self.edges),
        ];
        if self.duplicates_dropped > 0 {
            lines.push(format!("  Duplicate interactions dropped: {}", self.duplicates_dropped));
        }
        for (node_type, count) in &self.node_types {
            lines.push(format!("  {}: {}", node_type, count));
        }
        lines.push(format!("  Components: {}", self.components));
        if self.unconnected.is_empty() {
            lines.push("  Unconnected: none".to_string());
        } else {
            lines.push(format!("  Unconnected: {}", self.unconnected.join(", ")));
        }
        lines.join("\n")
    }
}

/// Summarize one network.
pub fn inspect(path: &Path) -> Result<InspectResult> {
    let network = load_network(path)?;
    let mut node_types = BTreeMap::new();
    for node in network.nodes() {
        *node_types.entry(node.node_type.to_string()).or_insert(0) += 1;
    }
    Ok(InspectResult {
        title: network.title().to_string(),
        nodes: network.len(),
        edges: network.edges().len(),
        duplicates_dropped: network.duplicates_dropped(),
        node_types,
        unconnected: network.unconnected().into_iter().collect(),
        components: network.components().len(),
    })
}

// === intersect ===

#[derive(Serialize)]
pub struct IntersectResult {
    pub main: String,
    pub side: String,
    pub count: usize,
    pub shared: Vec<String>,
}

impl Output for IntersectResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.shared.is_empty() {
            return format!("No nodes shared by '{}' and '{}'", self.main, self.side);
        }
        let mut lines = vec![format!(
            "{} node(s) shared by '{}' and '{}':",
            self.count, self.main, self.side
        )];
        lines.extend(self.shared.iter().map(|id| format!("  {}", id)));
        lines.join("\n")
    }
}

/// Node ids present in both networks.
pub fn intersect(main: &Path, side: &Path, settings: &ResolvedSettings) -> Result<IntersectResult> {
    let coord = open_pair(main, side, settings)?;
    let shared: Vec<String> = coord.intersection()?.into_iter().collect();
    let title = |id: PanelId| {
        coord
            .panel(id)
            .ok()
            .and_then(|p| p.network())
            .map(|n| n.title().to_string())
            .unwrap_or_default()
    };
    Ok(IntersectResult {
        main: title(PanelId::Main),
        side: title(PanelId::Side),
        count: shared.len(),
        shared,
    })
}

// === merge ===

#[derive(Serialize)]
pub struct MergeResult {
    pub title: String,
    pub nodes: usize,
    pub edges: usize,
    pub hidden: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkData>,
}

impl Output for MergeResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Merged '{}': {} nodes, {} interactions, {} hidden",
            self.title,
            self.nodes,
            self.edges,
            self.hidden.len()
        )];
        if let Some(path) = &self.output {
            lines.push(format!("Written to {}", path.display()));
        }
        lines.join("\n")
    }
}

/// Merge the side network into the main one.
pub fn merge(
    main: &Path,
    side: &Path,
    output: Option<&Path>,
    settings: &ResolvedSettings,
) -> Result<MergeResult> {
    let mut coord = open_pair(main, side, settings)?;
    coord.merge()?;
    let panel = coord.main();
    let data = panel.to_network_data()?;
    let hidden: Vec<String> = panel.hidden().iter().cloned().collect();

    let result = MergeResult {
        title: data.title.clone(),
        nodes: data.nodes.len(),
        edges: data.interactions.len(),
        hidden,
        output: output.map(Path::to_path_buf),
        network: None,
    };
    match output {
        Some(path) => {
            write_network(path, &data)?;
            Ok(result)
        }
        None => Ok(MergeResult {
            network: Some(data),
            ..result
        }),
    }
}

// === layout ===

#[derive(Serialize)]
pub struct PanelLayout {
    pub panel: PanelId,
    pub title: String,
    pub positions: BTreeMap<String, Position>,
}

#[derive(Serialize)]
pub struct LayoutResult {
    pub layout: LayoutName,
    /// `true` when both panels were laid out together
    pub dual: bool,
    pub panels: Vec<PanelLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Output for LayoutResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Layout: {}{}",
            self.layout,
            if self.dual { " (dual)" } else { "" }
        )];
        for panel in &self.panels {
            lines.push(format!("[{}] {}", panel.panel, panel.title));
            for (id, p) in &panel.positions {
                lines.push(format!("  {:<20} {:>9.2} {:>9.2}", id, p.x, p.y));
            }
        }
        if let Some(path) = &self.output {
            lines.push(format!("Written to {}", path.display()));
        }
        lines.join("\n")
    }
}

fn panel_layout(coord: &DualPanelCoordinator<HeadlessSurface>, id: PanelId) -> Option<PanelLayout> {
    let panel = coord.panel(id).ok()?;
    let network = panel.network()?;
    let positions = network
        .nodes()
        .iter()
        .filter(|n| panel.is_displayed(&n.id))
        .filter_map(|n| n.position.map(|p| (n.id.clone(), p)))
        .collect();
    Some(PanelLayout {
        panel: id,
        title: network.title().to_string(),
        positions,
    })
}

/// Lay out one network, or two networks together.
pub fn layout(
    file: &Path,
    side: Option<&Path>,
    name: Option<LayoutName>,
    show_hidden: bool,
    output: Option<&Path>,
    settings: &ResolvedSettings,
) -> Result<LayoutResult> {
    let name = name.unwrap_or(settings.default_layout.value);
    let mut coord = match side {
        Some(side) => open_pair(file, side, settings)?,
        None => {
            let mut coord = coordinator(settings);
            coord.load(PanelId::Main, load_network(file)?)?;
            coord
        }
    };

    if show_hidden {
        coord.toggle_hidden(PanelTarget::Main, true)?;
        if side.is_some() {
            coord.toggle_hidden(PanelTarget::Side, true)?;
        }
    }
    let target = if side.is_some() {
        PanelTarget::Both
    } else {
        PanelTarget::Main
    };
    coord.apply_layout(target, name)?;
    coord.poll_layouts();

    if let Some(path) = output {
        write_network(path, &coord.main().to_network_data()?)?;
    }

    let panels = [PanelId::Main, PanelId::Side]
        .into_iter()
        .filter_map(|id| panel_layout(&coord, id))
        .collect();
    Ok(LayoutResult {
        layout: name,
        dual: side.is_some(),
        panels,
        output: output.map(Path::to_path_buf),
    })
}

// === color ===

#[derive(Serialize)]
pub struct ColorResult {
    pub weight: String,
    pub min: f64,
    pub max: f64,
    pub threshold: f64,
    pub negative: Color,
    pub positive: Color,
    pub nodes: Vec<NodeColoring>,
}

impl Output for ColorResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Weight '{}': {} .. {} .. {} ({} -> white -> {})",
            self.weight, self.min, self.threshold, self.max, self.negative, self.positive
        )];
        for node in &self.nodes {
            let value = node
                .value
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            let color = node
                .color
                .map(|c| c.to_string())
                .unwrap_or_else(|| "default".to_string());
            lines.push(format!("  {:<20} {:>10} {}", node.id, value, color));
        }
        lines.join("\n")
    }
}

/// Parameters of `nv color` as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ColorArgs {
    pub weight: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub threshold: Option<f64>,
    pub negative: Option<Color>,
    pub positive: Option<Color>,
    pub alternate: Option<(NodeType, String)>,
}

/// Range of the weights a coloring pass reads
fn observed_range(network: &Network, args: &ColorArgs) -> Option<WeightRange> {
    let values = network.nodes().iter().filter_map(|n| {
        let key = match &args.alternate {
            Some((node_type, key)) if *node_type == n.node_type => key,
            _ => &args.weight,
        };
        n.weights.get(key).copied()
    });
    WeightRange::from_values(values)
}

/// Color a network's displayed nodes by a weight.
pub fn color(file: &Path, args: &ColorArgs, settings: &ResolvedSettings) -> Result<ColorResult> {
    let network = load_network(file)?;
    let (min, max) = match (args.min, args.max) {
        (Some(min), Some(max)) => (min, max),
        (min, max) => {
            let range = observed_range(&network, args).ok_or_else(|| {
                Error::InvalidInput(format!("No node has a value for weight '{}'", args.weight))
            })?;
            (min.unwrap_or(range.min), max.unwrap_or(range.max))
        }
    };
    let threshold = args.threshold.unwrap_or((min + max) / 2.0);
    let negative = args.negative.unwrap_or(settings.negative_color.value);
    // A low end given alone gets its complementary hue as the high end
    let positive = args
        .positive
        .or_else(|| args.negative.and_then(|neg| hue_palette(neg, 2).get(1).copied()))
        .unwrap_or(settings.positive_color.value);
    let params = ColorByWeight {
        weight_key: args.weight.clone(),
        alternate: args.alternate.clone(),
        min,
        max,
        threshold: Some(threshold),
        negative,
        positive,
    };

    let mut coord = coordinator(settings);
    coord.load(PanelId::Main, network)?;
    let nodes = coord.main_mut().color_by_weight(&params)?;
    Ok(ColorResult {
        weight: params.weight_key,
        min,
        max,
        threshold,
        negative: params.negative,
        positive: params.positive,
        nodes,
    })
}

// === search ===

#[derive(Serialize)]
pub struct SearchResult {
    pub substring: String,
    pub matches: Vec<String>,
    /// Selection mirrored into the side network
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_selection: Option<Vec<String>>,
}

impl Output for SearchResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = if self.matches.is_empty() {
            vec![format!("No labels contain '{}'", self.substring)]
        } else {
            vec![format!(
                "{} match(es) for '{}': {}",
                self.matches.len(),
                self.substring,
                self.matches.join(", ")
            )]
        };
        if let Some(side) = &self.side_selection {
            lines.push(format!("Mirrored in side panel: {}", side.join(", ")));
        }
        lines.join("\n")
    }
}

/// Select nodes by label substring, mirroring into a side network if given.
pub fn search(
    file: &Path,
    substring: &str,
    side: Option<&Path>,
    settings: &ResolvedSettings,
) -> Result<SearchResult> {
    let mut coord = match side {
        Some(side) => open_pair(file, side, settings)?,
        None => {
            let mut coord = coordinator(settings);
            coord.load(PanelId::Main, load_network(file)?)?;
            coord
        }
    };
    let matches = coord.search(PanelId::Main, substring)?;
    let side_selection = coord
        .side()
        .map(|s| s.selection().iter().cloned().collect());
    Ok(SearchResult {
        substring: substring.to_string(),
        matches: matches.into_iter().collect(),
        side_selection,
    })
}

// === render ===

#[derive(Serialize)]
pub struct RenderResult {
    pub output: PathBuf,
    pub layout: LayoutName,
    pub nodes_drawn: usize,
    pub bytes: usize,
}

impl Output for RenderResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Rendered {} node(s) with {} layout to {} ({} bytes)",
            self.nodes_drawn,
            self.layout,
            self.output.display(),
            self.bytes
        )
    }
}

/// Lay out a network and write an SVG snapshot of its surface.
pub fn render(
    file: &Path,
    name: Option<LayoutName>,
    show_hidden: bool,
    output: &Path,
    settings: &ResolvedSettings,
) -> Result<RenderResult> {
    let name = name.unwrap_or(settings.default_layout.value);
    let mut coord = coordinator(settings);
    coord.load(PanelId::Main, load_network(file)?)?;
    if show_hidden {
        coord.toggle_hidden(PanelTarget::Main, true)?;
    }
    coord.apply_layout(PanelTarget::Main, name)?;
    coord.poll_layouts();

    let elements = coord.main().surface().snapshot();
    let nodes_drawn = elements
        .visible_nodes()
        .filter(|n| n.position.is_some())
        .count();
    let svg = elements_to_svg(&elements, &SnapshotStyle::default());
    std::fs::write(output, &svg)?;
    tracing::info!(path = %output.display(), nodes_drawn, "Wrote SVG snapshot");

    Ok(RenderResult {
        output: output.to_path_buf(),
        layout: name,
        nodes_drawn,
        bytes: svg.len(),
    })
}

// === config show ===

#[derive(Serialize)]
pub struct ConfigShowResult {
    #[serde(flatten)]
    pub settings: ResolvedSettings,
}

impl Output for ConfigShowResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let s = &self.settings;
        let path = s
            .config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        [
            format!("Config file: {}", path),
            format!("  default-layout  {} ({})", s.default_layout.value, s.default_layout.source),
            format!("  fallback-layout {} ({})", s.fallback_layout.value, s.fallback_layout.source),
            format!("  highlight-color {} ({})", s.highlight_color.value, s.highlight_color.source),
            format!("  negative-color  {} ({})", s.negative_color.value, s.negative_color.source),
            format!("  positive-color  {} ({})", s.positive_color.value, s.positive_color.source),
            format!("  output-format   {} ({})", s.output_format.value, s.output_format.source),
        ]
        .join("\n")
    }
}

pub fn config_show(settings: &ResolvedSettings) -> ConfigShowResult {
    ConfigShowResult {
        settings: settings.clone(),
    }
}

// === version ===

#[derive(Serialize)]
pub struct VersionResult {
    pub version: String,
    pub commit: String,
    pub built: String,
}

impl Output for VersionResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("nv {} ({} built {})", self.version, self.commit, self.built)
    }
}

pub fn version() -> VersionResult {
    VersionResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: env!("NV_GIT_COMMIT").to_string(),
        built: env!("NV_BUILD_TIMESTAMP").to_string(),
    }
}

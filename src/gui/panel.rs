//! One network panel: a rendering surface plus the state kept beside it.
//!
//! A [`PanelController`] exclusively owns its surface, the [`Network`] it
//! shows and its [`PanelState`]. Every mutation goes through the controller
//! so the logical network and the rendered elements never drift apart.

use super::shared::color::{Color, value_to_color};
use super::shared::layout::{Bounds, LayoutEdge, LayoutName, LayoutNode, Position};
use super::shared::render::{NodeShape, NodeStyle};
use super::shared::theme;
use super::surface::{LayoutRequest, LayoutTicket, RenderSurface};
use crate::models::{Edge, NetworkData, Network, Node, NodeIdSet, NodePatch, NodeType};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Gap between the two regions of a partitioned layout, and the cell size
/// used to size each region
const REGION_SPACING: f64 = 80.0;

/// Which of the two panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    Main,
    Side,
}

impl PanelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelId::Main => "main",
            PanelId::Side => "side",
        }
    }

    pub fn other(&self) -> PanelId {
        match self {
            PanelId::Main => PanelId::Side,
            PanelId::Side => PanelId::Main,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingLayout {
    layout: LayoutName,
    fit: bool,
}

/// Mutable state of one panel, reset on every load
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    /// Active layout; `Custom` means positions are left alone
    pub layout: LayoutName,
    /// Unconnected and user-marked nodes
    pub hidden: NodeIdSet,
    /// Whether hidden nodes are currently displayed anyway
    pub show_hidden: bool,
    pub selection: NodeIdSet,
    /// Styles that differ from the node's default style
    pub styles: HashMap<String, NodeStyle>,
    pending: BTreeMap<LayoutTicket, PendingLayout>,
}

impl PanelState {
    /// Layout runs requested and not yet applied
    pub fn pending_layouts(&self) -> usize {
        self.pending.len()
    }
}

/// Controls a host shows for a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelControls {
    pub layout: LayoutName,
    pub show_hidden: bool,
}

/// Parameters of a weight coloring pass
#[derive(Debug, Clone, PartialEq)]
pub struct ColorByWeight {
    /// Weight read from most nodes
    pub weight_key: String,
    /// Nodes of this type read this weight instead
    pub alternate: Option<(NodeType, String)>,
    pub min: f64,
    pub max: f64,
    /// Midpoint of the scale; halfway between min and max when `None`
    pub threshold: Option<f64>,
    pub negative: Color,
    pub positive: Color,
}

impl ColorByWeight {
    pub fn new(weight_key: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            weight_key: weight_key.into(),
            alternate: None,
            min,
            max,
            threshold: None,
            negative: theme::scale::NEGATIVE,
            positive: theme::scale::POSITIVE,
        }
    }

    fn key_for(&self, node: &Node) -> &str {
        match &self.alternate {
            Some((node_type, key)) if *node_type == node.node_type => key,
            _ => &self.weight_key,
        }
    }
}

/// Result of coloring one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeColoring {
    pub id: String,
    /// Weight value read, if the node had it
    pub value: Option<f64>,
    /// `None` when the node fell back to its default style
    pub color: Option<Color>,
    pub border: Option<Color>,
}

/// Owns one rendering surface and the network displayed on it.
#[derive(Debug)]
pub struct PanelController<S: RenderSurface> {
    id: PanelId,
    surface: S,
    network: Option<Network>,
    state: PanelState,
    next_ticket: u64,
}

impl<S: RenderSurface> PanelController<S> {
    /// An empty panel bound to `surface`
    pub fn new(id: PanelId, surface: S) -> Self {
        Self {
            id,
            surface,
            network: None,
            state: PanelState::default(),
            next_ticket: 1,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn layout(&self) -> LayoutName {
        self.state.layout
    }

    pub fn hidden(&self) -> &NodeIdSet {
        &self.state.hidden
    }

    pub fn selection(&self) -> &NodeIdSet {
        &self.state.selection
    }

    pub fn controls(&self) -> PanelControls {
        PanelControls {
            layout: self.state.layout,
            show_hidden: self.state.show_hidden,
        }
    }

    fn require_network(&self) -> Result<&Network> {
        self.network.as_ref().ok_or_else(|| {
            tracing::warn!(panel = %self.id, "Operation rejected: no network loaded");
            Error::NoNetwork(self.id.to_string())
        })
    }

    /// Whether `id` is currently displayed
    pub fn is_displayed(&self, id: &str) -> bool {
        self.state.show_hidden || !self.state.hidden.contains(id)
    }

    /// Ids of displayed nodes, in network order
    pub fn visible_ids(&self) -> Vec<String> {
        self.network
            .iter()
            .flat_map(|n| n.nodes())
            .filter(|n| self.is_displayed(&n.id))
            .map(|n| n.id.clone())
            .collect()
    }

    /// Show `network`, hiding its unconnected and flagged nodes
    pub fn load(&mut self, network: Network) {
        let hidden = network.default_hidden();
        self.load_with_hidden(network, hidden);
    }

    /// Validate host data, then show it. Nothing changes on error.
    pub fn load_data(&mut self, data: NetworkData) -> Result<()> {
        let network = Network::from_data(data)?;
        self.load(network);
        Ok(())
    }

    /// Show `network` with an explicit hidden set
    pub fn load_with_hidden(&mut self, network: Network, hidden: NodeIdSet) {
        tracing::info!(
            panel = %self.id,
            title = network.title(),
            nodes = network.len(),
            edges = network.edges().len(),
            hidden = hidden.len(),
            "Loading network"
        );
        self.surface.clear();
        self.surface.install(&network.renderable_elements(&hidden));
        self.state = PanelState {
            hidden,
            ..PanelState::default()
        };
        self.network = Some(network);
        self.surface.fit();
    }

    /// Drop every pending run, on the surface too
    fn cancel_pending(&mut self) {
        for ticket in std::mem::take(&mut self.state.pending).into_keys() {
            self.surface.cancel_layout(ticket);
        }
    }

    fn next_ticket(&mut self) -> LayoutTicket {
        let ticket = LayoutTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    fn request(&mut self, layout: LayoutName, ids: &[String], bounds: Option<Bounds>, fit: bool) -> Option<LayoutTicket> {
        let network = self.network.as_ref()?;
        let members: std::collections::HashSet<&str> = ids.iter().map(String::as_str).collect();
        let nodes: Vec<LayoutNode> = ids
            .iter()
            .filter_map(|id| network.node(id))
            .map(|n| {
                let p = n.position.unwrap_or_default();
                LayoutNode::with_position(n.id.clone(), p.x, p.y).with_degree(network.degree(&n.id))
            })
            .collect();
        let edges: Vec<LayoutEdge> = network
            .edges()
            .iter()
            .filter(|e| members.contains(e.source.as_str()) && members.contains(e.target.as_str()))
            .map(|e| LayoutEdge::new(e.source.clone(), e.target.clone()))
            .collect();

        let ticket = self.next_ticket();
        self.state.pending.insert(ticket, PendingLayout { layout, fit });
        self.surface.request_layout(LayoutRequest {
            ticket,
            layout,
            nodes,
            edges,
            bounds,
        });
        Some(ticket)
    }

    /// Run `name` over the displayed nodes and make it the active layout.
    ///
    /// `Custom` requests nothing. Earlier runs still pending are superseded.
    pub fn apply_layout(&mut self, name: LayoutName) -> Result<Option<LayoutTicket>> {
        self.require_network()?;
        self.state.layout = name;
        self.cancel_pending();
        if name.is_custom() {
            tracing::debug!(panel = %self.id, "Custom layout, positions kept");
            return Ok(None);
        }
        let ids = self.visible_ids();
        tracing::debug!(panel = %self.id, layout = %name, nodes = ids.len(), "Applying layout");
        Ok(self.request(name, &ids, None, true))
    }

    /// Run `primary` over the nodes of `ids` and `fallback` over the
    /// remaining displayed nodes, side by side. The active layout becomes
    /// `Custom`.
    ///
    /// The primary region is sized for all of `ids` and laid out in id order,
    /// hidden members included, so panels sharing `ids` place them alike.
    /// Only displayed nodes take the resulting positions.
    pub fn apply_partitioned_layout(
        &mut self,
        primary: LayoutName,
        ids: &NodeIdSet,
        fallback: LayoutName,
    ) -> Result<Vec<LayoutTicket>> {
        let network = self.require_network()?;
        let inside: Vec<String> = ids.iter().filter(|id| network.contains(id)).cloned().collect();
        let outside: Vec<String> = self
            .visible_ids()
            .into_iter()
            .filter(|id| !ids.contains(id))
            .collect();
        self.cancel_pending();

        let primary_bounds = Bounds::for_count(0.0, 0.0, ids.len(), REGION_SPACING);
        let fallback_bounds = Bounds::for_count(
            primary_bounds.width + REGION_SPACING,
            0.0,
            outside.len(),
            REGION_SPACING,
        );
        tracing::debug!(
            panel = %self.id,
            primary = %primary,
            fallback = %fallback,
            inside = inside.len(),
            outside = outside.len(),
            "Applying partitioned layout"
        );

        let mut tickets = Vec::new();
        for (layout, members, bounds) in [
            (primary, &inside, primary_bounds),
            (fallback, &outside, fallback_bounds),
        ] {
            if members.is_empty() || layout.is_custom() {
                continue;
            }
            if let Some(ticket) = self.request(layout, members, Some(bounds), true) {
                tickets.push(ticket);
            }
        }
        self.state.layout = LayoutName::Custom;
        Ok(tickets)
    }

    /// Apply layout runs the surface has finished.
    ///
    /// Positions are written back only here. Runs no longer pending are
    /// dropped. Returns how many runs were applied.
    pub fn poll_layouts(&mut self) -> usize {
        let outcomes = self.surface.take_completed_layouts();
        let mut applied = 0;
        let mut fit = false;
        for outcome in outcomes {
            let Some(pending) = self.state.pending.remove(&outcome.ticket) else {
                tracing::warn!(panel = %self.id, ticket = outcome.ticket.0, "Discarding stale layout run");
                continue;
            };
            let accepted: Vec<(String, Position)> = outcome
                .positions
                .into_iter()
                .filter(|(id, _)| self.is_displayed(id))
                .collect();
            for (id, position) in &accepted {
                self.surface.set_position(id, *position);
            }
            if let Some(network) = self.network.as_mut() {
                for (id, position) in &accepted {
                    network.set_position(id, *position);
                }
            }
            tracing::debug!(
                panel = %self.id,
                ticket = outcome.ticket.0,
                layout = %pending.layout,
                "Layout run complete"
            );
            fit |= pending.fit;
            applied += 1;
        }
        if fit && self.state.pending.is_empty() {
            self.surface.fit();
        }
        applied
    }

    /// Show or hide the hidden set, then rerun the active layout
    pub fn toggle_hidden(&mut self, show: bool) -> Result<()> {
        self.require_network()?;
        tracing::debug!(panel = %self.id, show, hidden = self.state.hidden.len(), "Toggling hidden nodes");
        self.state.show_hidden = show;
        for id in &self.state.hidden {
            self.surface.set_visible(id, show);
        }
        self.surface.fit();
        self.rerun_layout()
    }

    /// The visible set changed: rerun the active layout unless it is `Custom`
    fn rerun_layout(&mut self) -> Result<()> {
        let layout = self.state.layout;
        if !layout.is_custom() {
            self.apply_layout(layout)?;
        }
        Ok(())
    }

    /// Add nodes to the hidden set
    pub fn hide_nodes<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let network = self.require_network()?;
        let ids: Vec<String> = ids
            .into_iter()
            .filter(|id| network.contains(id))
            .map(str::to_string)
            .collect();
        let mut changed = false;
        for id in ids {
            if !self.state.show_hidden {
                self.surface.set_visible(&id, false);
            }
            changed |= self.state.hidden.insert(id);
        }
        if changed && !self.state.show_hidden {
            self.rerun_layout()?;
        }
        Ok(())
    }

    /// Remove nodes from the hidden set
    pub fn unhide_nodes<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> Result<()> {
        self.require_network()?;
        let mut changed = false;
        for id in ids {
            if self.state.hidden.remove(id) {
                self.surface.set_visible(id, true);
                changed = true;
            }
        }
        if changed && !self.state.show_hidden {
            self.rerun_layout()?;
        }
        Ok(())
    }

    /// Ids of nodes whose label contains `substring` (case-sensitive).
    /// An empty substring matches nothing.
    pub fn matching(&self, substring: &str) -> Vec<String> {
        if substring.is_empty() {
            return Vec::new();
        }
        self.network
            .iter()
            .flat_map(|n| n.nodes())
            .filter(|n| n.label.contains(substring))
            .map(|n| n.id.clone())
            .collect()
    }

    /// Select every node whose label contains `substring`
    pub fn search(&mut self, substring: &str) -> Result<NodeIdSet> {
        self.require_network()?;
        let matches = self.matching(substring);
        tracing::debug!(panel = %self.id, substring, matches = matches.len(), "Search");
        for id in &matches {
            self.select(id)?;
        }
        Ok(matches.into_iter().collect())
    }

    /// Select a node. Returns whether the selection changed.
    pub fn select(&mut self, id: &str) -> Result<bool> {
        if !self.require_network()?.contains(id) {
            return Err(Error::NodeNotFound(id.to_string()));
        }
        let changed = self.state.selection.insert(id.to_string());
        if changed {
            self.surface.set_selected(id, true);
        }
        Ok(changed)
    }

    /// Unselect a node. Returns whether the selection changed.
    pub fn unselect(&mut self, id: &str) -> Result<bool> {
        if !self.require_network()?.contains(id) {
            return Err(Error::NodeNotFound(id.to_string()));
        }
        let changed = self.state.selection.remove(id);
        if changed {
            self.surface.set_selected(id, false);
        }
        Ok(changed)
    }

    /// Style the node is currently drawn with
    pub fn current_style(&self, id: &str) -> Option<NodeStyle> {
        if let Some(style) = self.state.styles.get(id) {
            return Some(*style);
        }
        self.network.as_ref()?.node(id).map(theme::default_style)
    }

    fn set_style(&mut self, id: &str, style: NodeStyle) {
        self.surface.set_style(id, &style);
        self.state.styles.insert(id.to_string(), style);
    }

    /// Apply the provided fields of `patch` to node `id`.
    ///
    /// The drawn style follows explicit color and shape changes only.
    pub fn update_node(&mut self, id: &str, patch: &NodePatch) -> Result<()> {
        let current = self.current_style(id);
        let network = self
            .network
            .as_mut()
            .ok_or_else(|| Error::NoNetwork(self.id.to_string()))?;
        let node = network.patch_node(id, patch)?;
        let label = node.label.clone();
        tracing::debug!(panel = %self.id, id, "Node updated");

        if patch.label.is_some() {
            self.surface.set_label(id, &label);
        }
        if patch.color.is_some() || patch.shape.is_some() {
            if let Some(mut style) = current {
                if let Some(color) = patch.color {
                    style.background = color;
                }
                if let Some(shape) = patch.shape {
                    style.shape = shape;
                }
                self.set_style(id, style);
            }
        }
        Ok(())
    }

    /// Color displayed nodes by a weight.
    ///
    /// Nodes without the weight, or whose value cannot be placed on the
    /// scale, fall back to their default style.
    pub fn color_by_weight(&mut self, params: &ColorByWeight) -> Result<Vec<NodeColoring>> {
        if params.min == params.max {
            tracing::warn!(panel = %self.id, min = params.min, "Rejected degenerate color range");
            return Err(Error::DegenerateRange(params.min));
        }
        let network = self.require_network()?;
        let threshold = params
            .threshold
            .unwrap_or((params.min + params.max) / 2.0);

        let mut report = Vec::new();
        let mut styles = Vec::new();
        for node in network.nodes().iter().filter(|n| self.is_displayed(&n.id)) {
            let value = node.weights.get(params.key_for(node)).copied();
            let color = value.and_then(|v| {
                value_to_color(v, params.min, params.max, threshold, params.negative, params.positive)
            });
            let shape = self
                .state
                .styles
                .get(&node.id)
                .map(|s| s.shape)
                .unwrap_or_else(|| theme::default_style(node).shape);
            let (style, border) = match (value, color) {
                (Some(v), Some(background)) => {
                    let border = if v <= 0.0 { params.negative } else { params.positive };
                    (
                        NodeStyle {
                            background,
                            border,
                            shape,
                        },
                        Some(border),
                    )
                }
                _ => (theme::default_style(node), None),
            };
            styles.push((node.id.clone(), style));
            report.push(NodeColoring {
                id: node.id.clone(),
                value,
                color,
                border,
            });
        }

        let reverted = report.iter().filter(|r| r.color.is_none()).count();
        tracing::debug!(
            panel = %self.id,
            weight = %params.weight_key,
            colored = report.len() - reverted,
            reverted,
            "Colored nodes by weight"
        );
        for (id, style) in styles {
            self.set_style(&id, style);
        }
        Ok(report)
    }

    /// Fill the given nodes with `color`, keeping border and shape
    pub fn highlight<'a>(&mut self, ids: impl IntoIterator<Item = &'a String>, color: Color) {
        for id in ids {
            if let Some(mut style) = self.current_style(id) {
                style.background = color;
                self.set_style(id, style);
            }
        }
    }

    /// Return the given nodes to their default style
    pub fn reset_node_styles<'a>(&mut self, ids: impl IntoIterator<Item = &'a String>) {
        let Some(network) = &self.network else {
            return;
        };
        for id in ids {
            if let Some(node) = network.node(id) {
                self.state.styles.remove(id);
                self.surface.set_style(id, &theme::default_style(node));
            }
        }
    }

    /// Return every node to its default style
    pub fn reset_styles(&mut self) {
        self.state.styles.clear();
        if let Some(network) = &self.network {
            for node in network.nodes() {
                self.surface.set_style(&node.id, &theme::default_style(node));
            }
        }
    }

    pub fn fit(&mut self) {
        self.surface.fit();
    }

    pub fn resize(&mut self) {
        self.surface.resize();
    }

    /// Nodes with their current positions and hidden flags, for persistence
    pub fn renderable_nodes(&self) -> Vec<Node> {
        self.network
            .iter()
            .flat_map(|n| n.nodes())
            .map(|n| Node {
                hidden: self.state.hidden.contains(&n.id),
                ..n.clone()
            })
            .collect()
    }

    pub fn renderable_edges(&self) -> Vec<Edge> {
        self.network
            .iter()
            .flat_map(|n| n.edges())
            .cloned()
            .collect()
    }

    /// Host object for the displayed network
    pub fn to_network_data(&self) -> Result<NetworkData> {
        let network = self.require_network()?;
        Ok(NetworkData {
            title: network.title().to_string(),
            interactions: self.renderable_edges(),
            nodes: self.renderable_nodes(),
        })
    }

    /// Tooltip rows shown when hovering a node
    pub fn node_info(&self, id: &str) -> Option<Vec<(&'static str, String)>> {
        let node = self.network.as_ref()?.node(id)?;
        Some(vec![
            ("Probe", node.id.clone()),
            ("Type", node.node_type.to_string()),
            ("Symbol", node.symbol_string()),
        ])
    }

    /// Suggested color and shape when a node's type is edited
    pub fn type_defaults(&self, node_type: NodeType) -> (Color, NodeShape) {
        theme::node_defaults(node_type)
    }
}

//! In-memory rendering surface.
//!
//! `HeadlessSurface` keeps the element state a graphical engine would hold
//! (visibility, style, selection, labels, positions and a viewport) and runs
//! layouts with [`compute_layout`]. Finished runs are queued and only become
//! visible through [`RenderSurface::take_completed_layouts`]; nodes move when
//! the owner accepts a run and calls [`RenderSurface::set_position`].

use super::shared::layout::{Bounds, LayoutConfig, LayoutName, Position, compute_layout};
use super::shared::render::{NodeStyle, RenderEdge, RenderNode, RenderableElements};
use super::surface::{LayoutOutcome, LayoutRequest, LayoutTicket, RenderSurface};
use std::collections::{BTreeMap, VecDeque};

/// Default container size in pixels
pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

const FIT_PADDING: f64 = 30.0;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 5.0;

#[derive(Debug, Clone)]
struct SurfaceNode {
    label: String,
    position: Option<Position>,
    style: NodeStyle,
    visible: bool,
    selected: bool,
}

/// Camera over the graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Container size
    pub width: f64,
    pub height: f64,
    /// Graph coordinate shown at the container center
    pub center: Position,
    /// 1.0 = 100%
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            center: Position::default(),
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Graph-space rectangle currently on screen
    pub fn visible_bounds(&self) -> Bounds {
        let w = self.width / self.zoom;
        let h = self.height / self.zoom;
        Bounds::new(self.center.x - w / 2.0, self.center.y - h / 2.0, w, h)
    }
}

/// A rendering surface with no display.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    nodes: BTreeMap<String, SurfaceNode>,
    order: Vec<String>,
    edges: Vec<RenderEdge>,
    layout_config: LayoutConfig,
    finished: VecDeque<LayoutOutcome>,
    requested: Vec<(LayoutTicket, LayoutName)>,
    viewport: Viewport,
    fit_count: usize,
    resize_count: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_config(layout_config: LayoutConfig) -> Self {
        Self {
            layout_config,
            ..Self::default()
        }
    }

    /// Change the container size; takes effect on the next `resize`
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width.max(1.0);
        self.viewport.height = height.max(1.0);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn fit_count(&self) -> usize {
        self.fit_count
    }

    pub fn resize_count(&self) -> usize {
        self.resize_count
    }

    /// Every layout requested so far, in order
    pub fn requested_layouts(&self) -> &[(LayoutTicket, LayoutName)] {
        &self.requested
    }

    /// Runs requested but not yet taken
    pub fn pending_layouts(&self) -> usize {
        self.finished.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(|n| n.selected)
    }

    pub fn style(&self, id: &str) -> Option<NodeStyle> {
        self.nodes.get(id).map(|n| n.style)
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|n| n.label.as_str())
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.nodes.get(id).and_then(|n| n.position)
    }

    /// Ids of visible nodes, sorted
    pub fn visible_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.visible)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Ids of selected nodes, sorted
    pub fn selected_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.selected)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Current element state, nodes in install order
    pub fn snapshot(&self) -> RenderableElements {
        let nodes = self
            .order
            .iter()
            .filter_map(|id| {
                self.nodes.get(id).map(|n| RenderNode {
                    id: id.clone(),
                    label: n.label.clone(),
                    position: n.position,
                    style: n.style,
                    hidden: !n.visible,
                })
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|e| RenderEdge {
                hidden: !(self.is_visible(&e.source) && self.is_visible(&e.target)),
                ..e.clone()
            })
            .collect();
        RenderableElements { nodes, edges }
    }
}

impl RenderSurface for HeadlessSurface {
    fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.edges.clear();
        self.finished.clear();
    }

    fn install(&mut self, elements: &RenderableElements) {
        self.clear();
        for node in &elements.nodes {
            self.order.push(node.id.clone());
            self.nodes.insert(
                node.id.clone(),
                SurfaceNode {
                    label: node.label.clone(),
                    position: node.position,
                    style: node.style,
                    visible: !node.hidden,
                    selected: false,
                },
            );
        }
        self.edges = elements.edges.clone();
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = visible;
        }
    }

    fn set_style(&mut self, id: &str, style: &NodeStyle) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.style = *style;
        }
    }

    fn set_selected(&mut self, id: &str, selected: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.selected = selected;
        }
    }

    fn set_label(&mut self, id: &str, label: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.label = label.to_string();
        }
    }

    fn set_position(&mut self, id: &str, position: Position) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.position = Some(position);
        }
    }

    fn request_layout(&mut self, request: LayoutRequest) {
        tracing::debug!(
            ticket = request.ticket.0,
            layout = %request.layout,
            nodes = request.nodes.len(),
            "Layout requested"
        );
        self.requested.push((request.ticket, request.layout));
        let positions = compute_layout(
            request.layout,
            &request.nodes,
            &request.edges,
            request.bounds,
            &self.layout_config,
        );
        self.finished.push_back(LayoutOutcome {
            ticket: request.ticket,
            positions,
        });
    }

    fn cancel_layout(&mut self, ticket: LayoutTicket) {
        self.finished.retain(|outcome| outcome.ticket != ticket);
    }

    fn take_completed_layouts(&mut self) -> Vec<LayoutOutcome> {
        self.finished.drain(..).collect()
    }

    fn fit(&mut self) {
        self.fit_count += 1;
        let positions: Vec<Position> = self
            .nodes
            .values()
            .filter(|n| n.visible)
            .filter_map(|n| n.position)
            .collect();
        let Some(bounds) = Bounds::enclosing(positions.iter()) else {
            return;
        };
        let w = bounds.width + 2.0 * FIT_PADDING;
        let h = bounds.height + 2.0 * FIT_PADDING;
        self.viewport.center = bounds.center();
        self.viewport.zoom = (self.viewport.width / w)
            .min(self.viewport.height / h)
            .clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn resize(&mut self) {
        self.resize_count += 1;
    }
}

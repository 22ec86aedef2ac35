//! Layout algorithms for network panels
//!
//! A panel's rendering surface decides how to run a layout; these are the
//! algorithms the headless surface ships with:
//! - `grid`: row-major cells filling the target bounds
//! - `circle`: nodes evenly spaced on one circle
//! - `concentric`: rings by degree, best-connected nodes in the middle
//! - `force`: force-directed simulation
//!
//! The force simulation uses:
//! - Circular gravity: pulls all nodes toward a center point
//! - Node repulsion: nodes push each other apart (inverse square law)
//! - Edge attraction: connected nodes are pulled together (spring force)
//! - Velocity damping: prevents oscillation and helps convergence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// 2D position/vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another position
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Calculate the magnitude (length) of this vector
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Axis-aligned rectangle a layout places its nodes in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square big enough for `count` nodes at `spacing`, with its top-left corner at (x, y)
    pub fn for_count(x: f64, y: f64, count: usize, spacing: f64) -> Self {
        let side = (count.max(1) as f64).sqrt().ceil() * spacing;
        Self::new(x, y, side, side)
    }

    /// Smallest bounds containing every position, or `None` for no positions
    pub fn enclosing<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `p` lies inside (edges included)
    pub fn contains(&self, p: &Position) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Name of a layout a panel can run.
///
/// `Custom` is the sentinel for "leave positions alone": it is never run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LayoutName {
    #[default]
    Custom,
    Grid,
    Circle,
    Concentric,
    Force,
}

impl LayoutName {
    /// Parse a layout name; `none`, `null` and `preset` are aliases of `custom`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "custom" | "none" | "null" | "preset" => Some(Self::Custom),
            "grid" => Some(Self::Grid),
            "circle" => Some(Self::Circle),
            "concentric" => Some(Self::Concentric),
            "force" | "cose" => Some(Self::Force),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Grid => "grid",
            Self::Circle => "circle",
            Self::Concentric => "concentric",
            Self::Force => "force",
        }
    }

    /// Whether this is the "do not reposition" sentinel
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for LayoutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LayoutName {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutName::parse(s)
            .ok_or_else(|| crate::Error::InvalidInput(format!("unknown layout '{}'", s)))
    }
}

impl TryFrom<String> for LayoutName {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LayoutName> for String {
    fn from(name: LayoutName) -> Self {
        name.as_str().to_string()
    }
}

/// Node in the layout graph
#[derive(Debug, Clone)]
pub struct LayoutNode {
    /// Node ID
    pub id: String,
    /// Current position
    pub position: Position,
    /// Velocity for physics simulation
    pub velocity: Position,
    /// Whether this node's position is fixed (e.g., being dragged)
    pub fixed: bool,
    /// Number of incident edges in the laid-out subgraph
    pub degree: usize,
}

impl LayoutNode {
    /// Create a new layout node at the origin
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_position(id, 0.0, 0.0)
    }

    /// Create a new layout node at a specific position
    pub fn with_position(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Position { x, y },
            velocity: Position::default(),
            fixed: false,
            degree: 0,
        }
    }

    /// Set the node degree
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Get the current speed (magnitude of velocity)
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

/// Edge in the layout graph
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
}

impl LayoutEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Tuning for the layout algorithms
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Distance between neighbouring nodes for grid/circle/concentric sizing
    pub node_spacing: f64,
    /// Damping factor for velocity (0-1, higher = slower decay)
    pub damping: f64,
    /// Strength of circular gravity pulling nodes toward center
    pub gravity_strength: f64,
    /// Center point for gravity
    pub gravity_center: Position,
    /// Repulsion strength between nodes (inverse square law)
    pub repulsion_strength: f64,
    /// Spring strength for edge attraction
    pub spring_strength: f64,
    /// Ideal resting length for springs
    pub spring_resting_length: f64,
    /// Maximum velocity for normal nodes
    pub max_velocity: f64,
    /// Velocity threshold below which a node is considered stable
    pub stable_threshold: f64,
    /// Iteration cap for the force simulation
    pub max_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: 80.0,
            damping: 0.92,
            gravity_strength: 0.05,
            gravity_center: Position::default(),
            repulsion_strength: 2500.0,
            spring_strength: 0.08,
            spring_resting_length: 120.0,
            max_velocity: 3.0,
            stable_threshold: 0.1,
            max_iterations: 500,
        }
    }
}

/// Compute positions for `nodes` with the named layout.
///
/// Nodes are placed inside `bounds` when given, otherwise inside a square
/// sized for the node count at the origin. `Custom` returns the current
/// positions unchanged. The result preserves the input order.
pub fn compute_layout(
    name: LayoutName,
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
    bounds: Option<Bounds>,
    config: &LayoutConfig,
) -> Vec<(String, Position)> {
    let bounds =
        bounds.unwrap_or_else(|| Bounds::for_count(0.0, 0.0, nodes.len(), config.node_spacing));
    let positions = match name {
        LayoutName::Custom => nodes.iter().map(|n| n.position).collect(),
        LayoutName::Grid => grid_positions(nodes.len(), bounds),
        LayoutName::Circle => circle_positions(nodes.len(), bounds),
        LayoutName::Concentric => concentric_positions(nodes, bounds, config.node_spacing),
        LayoutName::Force => force_positions(nodes, edges, bounds, config),
    };
    nodes.iter().map(|n| n.id.clone()).zip(positions).collect()
}

fn grid_positions(count: usize, bounds: Bounds) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let cell_w = bounds.width / cols as f64;
    let cell_h = bounds.height / rows as f64;
    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            Position::new(
                bounds.x + (col as f64 + 0.5) * cell_w,
                bounds.y + (row as f64 + 0.5) * cell_h,
            )
        })
        .collect()
}

fn circle_positions(count: usize, bounds: Bounds) -> Vec<Position> {
    let center = bounds.center();
    if count == 1 {
        return vec![center];
    }
    let radius = bounds.width.min(bounds.height) / 2.0;
    ring(center, radius, count)
}

fn ring(center: Position, radius: f64, count: usize) -> Vec<Position> {
    (0..count)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / count as f64 - PI / 2.0;
            Position::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

fn concentric_positions(nodes: &[LayoutNode], bounds: Bounds, spacing: f64) -> Vec<Position> {
    let center = bounds.center();
    let mut levels: Vec<usize> = nodes.iter().map(|n| n.degree).collect();
    levels.sort_unstable_by(|a, b| b.cmp(a));
    levels.dedup();

    // ring index for each node, highest degree innermost
    let ring_of = |degree: usize| levels.iter().position(|&d| d == degree).unwrap_or(0);
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); levels.len()];
    for (i, node) in nodes.iter().enumerate() {
        members[ring_of(node.degree)].push(i);
    }

    let mut positions = vec![center; nodes.len()];
    for (k, ring_members) in members.iter().enumerate() {
        let radius = if k == 0 && ring_members.len() == 1 {
            0.0
        } else {
            spacing * (k as f64 + 0.5)
        };
        for (slot, p) in ring_members
            .iter()
            .zip(ring(center, radius, ring_members.len()))
        {
            positions[*slot] = p;
        }
    }
    positions
}

fn force_positions(
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
    bounds: Bounds,
    config: &LayoutConfig,
) -> Vec<Position> {
    let mut engine = ForceLayout::with_config(LayoutConfig {
        gravity_center: Position::default(),
        ..config.clone()
    });
    // Seed on a circle so coincident starting positions still separate
    let seeds = ring(
        Position::default(),
        config.node_spacing * (nodes.len() as f64).sqrt(),
        nodes.len(),
    );
    for (node, seed) in nodes.iter().zip(seeds) {
        let mut n = node.clone();
        n.position = seed;
        n.velocity = Position::default();
        engine.add_node(n);
    }
    for edge in edges {
        engine.add_edge(edge.clone());
    }
    engine.run(config.max_iterations);

    // Recenter the settled layout on the target bounds
    let center = bounds.center();
    engine
        .nodes
        .iter()
        .map(|n| Position::new(n.position.x + center.x, n.position.y + center.y))
        .collect()
}

/// Force-directed layout simulation
///
/// Implements a physics-based layout algorithm with:
/// - Circular gravity pulling nodes toward a center
/// - Node-node repulsion (inverse square law)
/// - Edge spring attraction
/// - Velocity damping for stability
#[derive(Debug, Default)]
pub struct ForceLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub config: LayoutConfig,
    index: HashMap<String, usize>,
}

impl ForceLayout {
    /// Create a simulation with custom configuration
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn add_node(&mut self, node: LayoutNode) {
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: LayoutEdge) {
        self.edges.push(edge);
    }

    pub fn get_node(&self, id: &str) -> Option<&LayoutNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    fn apply_circular_gravity(&mut self) {
        let center = self.config.gravity_center;
        let strength = self.config.gravity_strength;

        for node in &mut self.nodes {
            if node.fixed {
                continue;
            }
            let dx = center.x - node.position.x;
            let dy = center.y - node.position.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > 0.0 {
                node.velocity.x += (dx / distance) * strength;
                node.velocity.y += (dy / distance) * strength;
            }
        }
    }

    /// Uses inverse square law: force = repulsion_strength / distance²
    fn apply_repulsion_forces(&mut self) {
        let repulsion = self.config.repulsion_strength;
        let n = self.nodes.len();
        let mut forces: Vec<(f64, f64)> = vec![(0.0, 0.0); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.nodes[j].position.x - self.nodes[i].position.x;
                let dy = self.nodes[j].position.y - self.nodes[i].position.y;
                let distance_sq = dx * dx + dy * dy;
                if distance_sq == 0.0 {
                    continue;
                }

                let force = repulsion / distance_sq;
                let distance = distance_sq.sqrt();
                let fx = (dx / distance) * force;
                let fy = (dy / distance) * force;

                if !self.nodes[i].fixed {
                    forces[i].0 -= fx;
                    forces[i].1 -= fy;
                }
                if !self.nodes[j].fixed {
                    forces[j].0 += fx;
                    forces[j].1 += fy;
                }
            }
        }

        for (node, (fx, fy)) in self.nodes.iter_mut().zip(forces) {
            node.velocity.x += fx;
            node.velocity.y += fy;
        }
    }

    /// Hooke's law: force = spring_strength * (distance - resting_length)
    fn apply_edge_attraction(&mut self) {
        let spring_strength = self.config.spring_strength;
        let resting_length = self.config.spring_resting_length;
        let mut forces: Vec<(f64, f64)> = vec![(0.0, 0.0); self.nodes.len()];

        for edge in &self.edges {
            let (Some(&from_idx), Some(&to_idx)) =
                (self.index.get(&edge.source), self.index.get(&edge.target))
            else {
                continue;
            };
            if from_idx == to_idx {
                continue;
            }

            let from = &self.nodes[from_idx];
            let to = &self.nodes[to_idx];
            if from.fixed && to.fixed {
                continue;
            }

            let dx = to.position.x - from.position.x;
            let dy = to.position.y - from.position.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance == 0.0 {
                continue;
            }

            let force = spring_strength * (distance - resting_length);
            let fx = (dx / distance) * force;
            let fy = (dy / distance) * force;

            if !from.fixed {
                forces[from_idx].0 += fx;
                forces[from_idx].1 += fy;
            }
            if !to.fixed {
                forces[to_idx].0 -= fx;
                forces[to_idx].1 -= fy;
            }
        }

        for (node, (fx, fy)) in self.nodes.iter_mut().zip(forces) {
            node.velocity.x += fx;
            node.velocity.y += fy;
        }
    }

    fn update_positions(&mut self) {
        let damping = self.config.damping;
        let max_velocity = self.config.max_velocity;

        for node in &mut self.nodes {
            if node.fixed {
                node.velocity = Position::default();
                continue;
            }

            node.velocity.x *= damping;
            node.velocity.y *= damping;

            let speed = node.speed();
            if speed > max_velocity {
                node.velocity.x = (node.velocity.x / speed) * max_velocity;
                node.velocity.y = (node.velocity.y / speed) * max_velocity;
            }

            node.position.x += node.velocity.x;
            node.position.y += node.velocity.y;
        }
    }

    /// Run one iteration of the force simulation
    ///
    /// Returns the maximum speed of any node (for convergence checking).
    pub fn tick(&mut self) -> f64 {
        self.apply_circular_gravity();
        self.apply_repulsion_forces();
        self.apply_edge_attraction();
        self.update_positions();

        self.nodes
            .iter()
            .filter(|n| !n.fixed)
            .map(|n| n.speed())
            .fold(0.0, f64::max)
    }

    /// Check if the layout has converged (all nodes below stable threshold)
    pub fn is_stable(&self) -> bool {
        let threshold = self.config.stable_threshold;
        self.nodes
            .iter()
            .filter(|n| !n.fixed)
            .all(|n| n.speed() < threshold)
    }

    /// Run the simulation until convergence or max iterations
    ///
    /// Returns the number of iterations run.
    pub fn run(&mut self, max_iterations: usize) -> usize {
        for i in 0..max_iterations {
            self.tick();
            if self.is_stable() {
                return i + 1;
            }
        }
        max_iterations
    }
}

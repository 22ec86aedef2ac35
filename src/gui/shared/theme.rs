//! Theme constants for network panels
//!
//! Default colors and shapes per node type, plus the fixed colors used for
//! highlighting, borders and weight-scale endpoints.

use super::color::Color;
use super::render::{NodeShape, NodeStyle};
use crate::models::{Node, NodeType};

/// Node fill colors by type
pub mod node {
    use super::Color;

    /// Messenger RNA (teal)
    pub const MRNA: Color = Color::rgb(0x00, 0x7f, 0x7f);
    /// MicroRNA (olive)
    pub const MIRNA: Color = Color::rgb(0x82, 0x7f, 0x00);
    /// Gene (blue)
    pub const GENE: Color = Color::rgb(0x4a, 0x90, 0xe2);
    /// Probe (slate)
    pub const PROBE: Color = Color::rgb(0x4a, 0x6f, 0xa5);
    /// Any other type
    pub const OTHER: Color = Color::rgb(0x99, 0x99, 0x99);
}

/// Panel-wide colors
pub mod panel {
    use super::Color;

    /// Nodes present in both panels while intersection highlighting is on
    pub const HIGHLIGHT: Color = Color::rgb(0xff, 0xde, 0x4b);
    /// Default node border
    pub const BORDER: Color = Color::rgb(0x00, 0x00, 0x00);
    /// Edge stroke
    pub const EDGE: Color = Color::rgb(0x7a, 0x8f, 0xa3);
    /// Canvas background for snapshots
    pub const BACKGROUND: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Label text
    pub const LABEL: Color = Color::rgb(0x1a, 0x23, 0x32);
}

/// Default endpoints for weight color scales
pub mod scale {
    use super::Color;

    /// Low end (and border of non-positive values)
    pub const NEGATIVE: Color = Color::rgb(0x00, 0x00, 0xff);
    /// High end (and border of positive values)
    pub const POSITIVE: Color = Color::rgb(0xff, 0x00, 0x00);
}

/// Default fill color for a node type
pub fn node_color(node_type: NodeType) -> Color {
    match node_type {
        NodeType::MRna => node::MRNA,
        NodeType::MiRna => node::MIRNA,
        NodeType::Gene => node::GENE,
        NodeType::Probe => node::PROBE,
        NodeType::Other => node::OTHER,
    }
}

/// Default shape for a node type
pub fn node_shape(node_type: NodeType) -> NodeShape {
    match node_type {
        NodeType::MRna | NodeType::Gene => NodeShape::Ellipse,
        NodeType::MiRna => NodeShape::Pentagon,
        NodeType::Probe => NodeShape::RoundRectangle,
        NodeType::Other => NodeShape::Rectangle,
    }
}

/// Color and shape suggested when a node's type is edited.
///
/// These are hints for an edit form; they are never written onto a node.
pub fn node_defaults(node_type: NodeType) -> (Color, NodeShape) {
    (node_color(node_type), node_shape(node_type))
}

/// Style a node renders with when nothing else overrides it
pub fn default_style(node: &Node) -> NodeStyle {
    NodeStyle {
        background: node.color.unwrap_or_else(|| node_color(node.node_type)),
        border: node.border_color.unwrap_or(panel::BORDER),
        shape: node.shape.unwrap_or_else(|| node_shape(node.node_type)),
    }
}

//! Data models for interaction networks.
//!
//! This module defines the core data structures:
//! - `Node` - A gene, probe or RNA with weights and display attributes
//! - `Edge` - A directed interaction between two nodes
//! - `NetworkData` - The host-shaped `{title, interactions, nodes}` object
//! - `NodePatch` - A partial update applied to one node
//! - `Network` - The validated logical graph (see [`network`])

pub mod graph;
pub mod network;

pub use network::Network;

use crate::gui::shared::color::Color;
use crate::gui::shared::layout::Position;
use crate::gui::shared::render::NodeShape;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Ordered set of node ids
pub type NodeIdSet = BTreeSet<String>;

/// Biological type of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "mRNA")]
    MRna,
    #[serde(rename = "miRNA")]
    MiRna,
    #[serde(rename = "gene")]
    Gene,
    #[serde(rename = "probe")]
    Probe,
    /// Anything the core has no specific styling for
    #[default]
    #[serde(rename = "other", other)]
    Other,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::MRna => "mRNA",
            NodeType::MiRna => "miRNA",
            NodeType::Gene => "gene",
            NodeType::Probe => "probe",
            NodeType::Other => "other",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = std::convert::Infallible;

    /// Case-insensitive; unknown names map to `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "mrna" => NodeType::MRna,
            "mirna" => NodeType::MiRna,
            "gene" => NodeType::Gene,
            "probe" => NodeType::Probe,
            _ => NodeType::Other,
        })
    }
}

/// A node in an interaction network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier, also the join key across panels
    pub id: String,

    /// Display label. Filled from symbols or id when missing.
    #[serde(default)]
    pub label: String,

    /// Node type
    #[serde(rename = "type", default)]
    pub node_type: NodeType,

    /// Gene symbols associated with the node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,

    /// Numeric attributes by name
    #[serde(rename = "weight", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weights: BTreeMap<String, f64>,

    /// Explicit fill color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    /// Explicit border color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,

    /// Explicit shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<NodeShape>,

    /// Last known position, absent until a layout has run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Marked hidden by the user (unconnected nodes are hidden regardless)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl Node {
    /// Create a node whose label is its id.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            node_type,
            symbols: Vec::new(),
            weights: BTreeMap::new(),
            color: None,
            border_color: None,
            shape: None,
            position: None,
            hidden: false,
        }
    }

    pub fn with_symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_weight(mut self, key: impl Into<String>, value: f64) -> Self {
        self.weights.insert(key.into(), value);
        self
    }

    /// Symbols joined with `/`
    pub fn symbol_string(&self) -> String {
        self.symbols.join("/")
    }

    /// Label to use when the host sent none
    pub(crate) fn fill_label(&mut self) {
        if self.label.is_empty() {
            self.label = if self.symbols.is_empty() {
                self.id.clone()
            } else {
                self.symbol_string()
            };
        }
    }
}

/// A directed interaction. Identity is the ordered (source, target) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node ID
    #[serde(alias = "from")]
    pub source: String,

    /// Target node ID
    #[serde(alias = "to")]
    pub target: String,

    /// Interaction type (free text)
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub edge_type: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type: String::new(),
        }
    }

    pub fn key(&self) -> (&str, &str) {
        (&self.source, &self.target)
    }
}

/// The object a host hands over when loading a panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub interactions: Vec<Edge>,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// Partial node update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub node_type: Option<NodeType>,
    /// Weight name and its new value
    pub weight: Option<(String, f64)>,
    pub color: Option<Color>,
    pub shape: Option<NodeShape>,
}

impl NodePatch {
    pub fn is_empty(&self) -> bool {
        *self == NodePatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_parsing() {
        assert_eq!("mRNA".parse::<NodeType>().unwrap(), NodeType::MRna);
        assert_eq!("MIRNA".parse::<NodeType>().unwrap(), NodeType::MiRna);
        assert_eq!("lncRNA".parse::<NodeType>().unwrap(), NodeType::Other);
    }

    #[test]
    fn test_node_type_serde_unknown_is_other() {
        let t: NodeType = serde_json::from_str("\"lncRNA\"").unwrap();
        assert_eq!(t, NodeType::Other);
        let t: NodeType = serde_json::from_str("\"miRNA\"").unwrap();
        assert_eq!(t, NodeType::MiRna);
        assert_eq!(serde_json::to_string(&NodeType::MRna).unwrap(), "\"mRNA\"");
    }

    #[test]
    fn test_node_deserialize_host_fields() {
        let json = r##"{
            "id": "hsa-miR-21",
            "type": "miRNA",
            "symbols": ["MIR21"],
            "weight": {"fold": 1.5},
            "borderColor": "#FF0000",
            "shape": "pentagon",
            "position": {"x": 1.0, "y": 2.0}
        }"##;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_type, NodeType::MiRna);
        assert_eq!(node.weights.get("fold"), Some(&1.5));
        assert_eq!(node.border_color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(node.shape, Some(NodeShape::Pentagon));
        assert_eq!(node.position, Some(Position::new(1.0, 2.0)));
        assert!(node.label.is_empty());
        assert!(!node.hidden);
    }

    #[test]
    fn test_fill_label() {
        let mut node = Node::new("p1", NodeType::Probe).with_symbols(&["TP53", "BRCA1"]);
        node.label.clear();
        node.fill_label();
        assert_eq!(node.label, "TP53/BRCA1");

        let mut bare = Node::new("p2", NodeType::Probe);
        bare.label.clear();
        bare.fill_label();
        assert_eq!(bare.label, "p2");
    }

    #[test]
    fn test_edge_accepts_from_to() {
        let edge: Edge = serde_json::from_str(r#"{"from": "a", "to": "b"}"#).unwrap();
        assert_eq!(edge.key(), ("a", "b"));
        assert!(edge.edge_type.is_empty());

        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(json, r#"{"source":"a","target":"b"}"#);
    }

    #[test]
    fn test_node_patch_is_empty() {
        assert!(NodePatch::default().is_empty());
        let patch = NodePatch {
            label: Some("x".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}

//! The logical network behind a panel.
//!
//! A [`Network`] is validated on construction: every interaction endpoint
//! must name an existing node and node ids are unique. Parallel interactions
//! (same ordered source/target pair) are collapsed, keeping the first.

use super::graph::connected_components;
use super::{Edge, NetworkData, Node, NodeIdSet, NodePatch, NodeType};
use crate::gui::shared::color::WeightRange;
use crate::gui::shared::layout::Position;
use crate::gui::shared::render::{RenderEdge, RenderNode, RenderableElements};
use crate::gui::shared::theme;
use crate::{Error, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static LABEL_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9-]").expect("label pattern is valid"));

/// Replace every character outside `[a-zA-Z0-9-]` with `-`.
pub fn sanitize_label(label: &str) -> String {
    LABEL_DISALLOWED.replace_all(label, "-").into_owned()
}

/// Plain set union of two node-id sets.
pub fn union(a: &NodeIdSet, b: &NodeIdSet) -> NodeIdSet {
    a.union(b).cloned().collect()
}

/// A validated interaction network.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    title: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<String, usize>,
    degree: HashMap<String, usize>,
    duplicates_dropped: usize,
}

impl Network {
    /// Build a network from its parts.
    ///
    /// Fails on duplicate node ids or interactions referencing unknown nodes.
    pub fn new(title: impl Into<String>, interactions: Vec<Edge>, nodes: Vec<Node>) -> Result<Self> {
        let mut seen = HashSet::new();
        for node in &nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(Error::DuplicateNode(node.id.clone()));
            }
        }
        for edge in &interactions {
            for end in [&edge.source, &edge.target] {
                if !seen.contains(end.as_str()) {
                    return Err(Error::DanglingEdge {
                        from: edge.source.clone(),
                        to: edge.target.clone(),
                        missing: end.clone(),
                    });
                }
            }
        }
        Ok(Self::assemble(title.into(), nodes, interactions))
    }

    /// Index and deduplicate parts already known to be consistent.
    fn assemble(title: String, mut nodes: Vec<Node>, interactions: Vec<Edge>) -> Self {
        for node in &mut nodes {
            node.fill_label();
        }
        let index: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        let total = interactions.len();
        let mut keys = HashSet::new();
        let edges: Vec<Edge> = interactions
            .into_iter()
            .filter(|e| keys.insert((e.source.clone(), e.target.clone())))
            .collect();

        let mut degree: HashMap<String, usize> =
            nodes.iter().map(|n| (n.id.clone(), 0)).collect();
        for edge in &edges {
            for end in [&edge.source, &edge.target] {
                if let Some(d) = degree.get_mut(end) {
                    *d += 1;
                }
            }
        }

        let duplicates_dropped = total - edges.len();
        if duplicates_dropped > 0 {
            tracing::debug!(title = %title, duplicates_dropped, "Dropped parallel interactions");
        }

        Self {
            title,
            nodes,
            edges,
            index,
            degree,
            duplicates_dropped,
        }
    }

    /// Build from the host object.
    pub fn from_data(data: NetworkData) -> Result<Self> {
        Self::new(data.title, data.interactions, data.nodes)
    }

    /// Parse host JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: NetworkData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// The host object for this network.
    pub fn to_data(&self) -> NetworkData {
        NetworkData {
            title: self.title.clone(),
            interactions: self.edges.clone(),
            nodes: self.nodes.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_data())?)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_ids(&self) -> NodeIdSet {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    /// Parallel interactions collapsed while loading
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    /// Number of interactions touching `id` (0 for unknown ids)
    pub fn degree(&self, id: &str) -> usize {
        self.degree.get(id).copied().unwrap_or(0)
    }

    /// Ids of nodes without any interaction, in node order.
    pub fn unconnected(&self) -> NodeIdSet {
        self.nodes
            .iter()
            .filter(|n| self.degree(&n.id) == 0)
            .map(|n| n.id.clone())
            .collect()
    }

    /// Nodes hidden right after loading: unconnected plus those flagged hidden.
    pub fn default_hidden(&self) -> NodeIdSet {
        let mut hidden = self.unconnected();
        hidden.extend(self.nodes.iter().filter(|n| n.hidden).map(|n| n.id.clone()));
        hidden
    }

    /// Element set for a panel with `hidden` nodes flagged.
    ///
    /// Edges are hidden whenever either endpoint is hidden.
    pub fn renderable_elements(&self, hidden: &NodeIdSet) -> RenderableElements {
        let nodes = self
            .nodes
            .iter()
            .map(|n| RenderNode {
                id: n.id.clone(),
                label: n.label.clone(),
                position: n.position,
                style: theme::default_style(n),
                hidden: hidden.contains(&n.id),
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|e| RenderEdge {
                source: e.source.clone(),
                target: e.target.clone(),
                edge_type: e.edge_type.clone(),
                hidden: hidden.contains(&e.source) || hidden.contains(&e.target),
            })
            .collect();
        RenderableElements { nodes, edges }
    }

    /// Node ids present in both networks.
    pub fn intersection(&self, other: &Network) -> NodeIdSet {
        self.nodes
            .iter()
            .filter(|n| other.contains(&n.id))
            .map(|n| n.id.clone())
            .collect()
    }

    /// Union of both networks.
    ///
    /// Nodes present in both are taken from `self`; interactions present in
    /// both appear once. The title is kept from `self`.
    pub fn merge(&self, other: &Network) -> Network {
        let mut nodes = self.nodes.clone();
        nodes.extend(other.nodes.iter().filter(|n| !self.contains(&n.id)).cloned());
        let mut edges = self.edges.clone();
        edges.extend(other.edges.iter().cloned());
        Self::assemble(self.title.clone(), nodes, edges)
    }

    /// Apply the provided fields of `patch` to node `id`.
    ///
    /// Labels are sanitized. Changing the type leaves color and shape alone.
    pub fn patch_node(&mut self, id: &str, patch: &NodePatch) -> Result<&Node> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?;
        let node = &mut self.nodes[i];
        if let Some(label) = &patch.label {
            node.label = sanitize_label(label);
        }
        if let Some(node_type) = patch.node_type {
            node.node_type = node_type;
        }
        if let Some((key, value)) = &patch.weight {
            node.weights.insert(key.clone(), *value);
        }
        if let Some(color) = patch.color {
            node.color = Some(color);
        }
        if let Some(shape) = patch.shape {
            node.shape = Some(shape);
        }
        Ok(&self.nodes[i])
    }

    /// Record a node's position. Returns `false` for unknown ids.
    pub fn set_position(&mut self, id: &str, position: Position) -> bool {
        match self.index.get(id) {
            Some(&i) => {
                self.nodes[i].position = Some(position);
                true
            }
            None => false,
        }
    }

    /// Observed range of weight `key`, optionally restricted to one node type.
    pub fn weight_range(&self, key: &str, node_type: Option<NodeType>) -> Option<WeightRange> {
        WeightRange::from_values(
            self.nodes
                .iter()
                .filter(|n| node_type.is_none_or(|t| n.node_type == t))
                .filter_map(|n| n.weights.get(key).copied()),
        )
    }

    /// Connected components, interactions taken as undirected.
    pub fn components(&self) -> Vec<Vec<String>> {
        connected_components(
            self.nodes.iter().map(|n| n.id.as_str()),
            self.edges.iter().map(|e| (e.source.as_str(), e.target.as_str())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> NodeIdSet {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn network(nodes: &[&str], edges: &[(&str, &str)]) -> Network {
        Network::new(
            "test",
            edges.iter().map(|(a, b)| Edge::new(*a, *b)).collect(),
            nodes.iter().map(|id| Node::new(*id, NodeType::Gene)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let err = Network::new(
            "t",
            vec![Edge::new("A", "Z")],
            vec![Node::new("A", NodeType::Gene)],
        )
        .unwrap_err();
        assert!(matches!(err, Error::DanglingEdge { ref missing, .. } if missing == "Z"));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let err = Network::new(
            "t",
            vec![],
            vec![Node::new("A", NodeType::Gene), Node::new("A", NodeType::Probe)],
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateNode(id) if id == "A"));
    }

    #[test]
    fn test_parallel_edges_deduplicated() {
        let mut first = Edge::new("A", "B");
        first.edge_type = "first".into();
        let mut second = Edge::new("A", "B");
        second.edge_type = "second".into();
        let net = Network::new(
            "t",
            vec![first, second, Edge::new("B", "A")],
            vec![Node::new("A", NodeType::Gene), Node::new("B", NodeType::Gene)],
        )
        .unwrap();
        assert_eq!(net.edges().len(), 2);
        assert_eq!(net.edges()[0].edge_type, "first");
        assert_eq!(net.duplicates_dropped(), 1);
        assert_eq!(net.degree("A"), 2);
    }

    #[test]
    fn test_unconnected_nodes() {
        let net = network(&["A", "B", "C"], &[("A", "B")]);
        assert_eq!(net.unconnected(), ids(&["C"]));
    }

    #[test]
    fn test_default_hidden_includes_flagged() {
        let mut nodes = vec![
            Node::new("A", NodeType::Gene),
            Node::new("B", NodeType::Gene),
            Node::new("C", NodeType::Gene),
        ];
        nodes[0].hidden = true;
        let net = Network::new("t", vec![Edge::new("A", "B")], nodes).unwrap();
        assert_eq!(net.default_hidden(), ids(&["A", "C"]));
    }

    #[test]
    fn test_renderable_elements_hides_edges_of_hidden_nodes() {
        let net = network(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let elements = net.renderable_elements(&ids(&["C"]));
        let hidden: Vec<&str> = elements
            .nodes
            .iter()
            .filter(|n| n.hidden)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(hidden, vec!["C"]);
        assert!(!elements.edges[0].hidden);
        assert!(elements.edges[1].hidden);
    }

    #[test]
    fn test_intersection_commutative() {
        let a = network(&["A", "B", "D"], &[]);
        let b = network(&["B", "C", "D"], &[]);
        assert_eq!(a.intersection(&b), ids(&["B", "D"]));
        assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn test_union() {
        assert_eq!(union(&ids(&["A", "B"]), &ids(&["B", "C"])), ids(&["A", "B", "C"]));
    }

    #[test]
    fn test_merge_prefers_invoking_side() {
        let mut main_nodes = vec![Node::new("A", NodeType::Gene), Node::new("B", NodeType::Gene)];
        main_nodes[1].label = "main-B".into();
        let main = Network::new("main", vec![Edge::new("A", "B")], main_nodes).unwrap();

        let mut side_nodes = vec![Node::new("B", NodeType::Probe), Node::new("C", NodeType::Gene)];
        side_nodes[0].label = "side-B".into();
        let side = Network::new("side", vec![Edge::new("B", "C")], side_nodes).unwrap();

        let merged = main.merge(&side);
        assert_eq!(merged.node_ids(), ids(&["A", "B", "C"]));
        assert_eq!(merged.title(), "main");
        assert_eq!(merged.node("B").unwrap().label, "main-B");
        assert_eq!(merged.node("B").unwrap().node_type, NodeType::Gene);
        assert!(merged.edges().len() <= main.edges().len() + side.edges().len());
        assert_eq!(merged.edges().len(), 2);
    }

    #[test]
    fn test_merge_removes_cross_network_duplicates() {
        let main = network(&["A", "B"], &[("A", "B")]);
        let side = network(&["A", "B"], &[("A", "B")]);
        let merged = main.merge(&side);
        assert_eq!(merged.edges().len(), 1);
        assert_eq!(merged.duplicates_dropped(), 1);
    }

    #[test]
    fn test_patch_node_sanitizes_label() {
        let mut net = network(&["A"], &[]);
        let patch = NodePatch {
            label: Some("TP53 (human)".into()),
            node_type: Some(NodeType::MiRna),
            weight: Some(("fold".into(), 2.5)),
            ..Default::default()
        };
        let node = net.patch_node("A", &patch).unwrap();
        assert_eq!(node.label, "TP53--human-");
        assert_eq!(node.node_type, NodeType::MiRna);
        assert_eq!(node.weights.get("fold"), Some(&2.5));
        assert_eq!(node.color, None);
        assert_eq!(node.shape, None);
    }

    #[test]
    fn test_patch_unknown_node() {
        let mut net = network(&["A"], &[]);
        let err = net.patch_node("Z", &NodePatch::default()).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(id) if id == "Z"));
    }

    #[test]
    fn test_weight_range_with_type_filter() {
        let net = Network::new(
            "t",
            vec![],
            vec![
                Node::new("g1", NodeType::Gene).with_weight("fold", -2.0),
                Node::new("g2", NodeType::Gene).with_weight("fold", 3.0),
                Node::new("m1", NodeType::MiRna).with_weight("fold", 10.0),
                Node::new("p1", NodeType::Probe),
            ],
        )
        .unwrap();
        let all = net.weight_range("fold", None).unwrap();
        assert_eq!((all.min, all.max), (-2.0, 10.0));
        let genes = net.weight_range("fold", Some(NodeType::Gene)).unwrap();
        assert_eq!((genes.min, genes.max), (-2.0, 3.0));
        assert!(net.weight_range("missing", None).is_none());
    }

    #[test]
    fn test_json_round_trip_fills_labels() {
        let json = r#"{
            "title": "demo",
            "interactions": [{"from": "a", "to": "b", "type": "targets"}],
            "nodes": [
                {"id": "a", "type": "miRNA", "symbols": ["MIR21"]},
                {"id": "b", "type": "mRNA"}
            ]
        }"#;
        let net = Network::from_json(json).unwrap();
        assert_eq!(net.node("a").unwrap().label, "MIR21");
        assert_eq!(net.node("b").unwrap().label, "b");

        let again = Network::from_json(&net.to_json().unwrap()).unwrap();
        assert_eq!(again, net);
    }

    #[test]
    fn test_components() {
        let net = network(&["A", "B", "C"], &[("A", "B")]);
        assert_eq!(net.components().len(), 2);
    }

    #[test]
    fn test_set_position() {
        let mut net = network(&["A"], &[]);
        assert!(net.set_position("A", Position::new(3.0, 4.0)));
        assert!(!net.set_position("Z", Position::new(0.0, 0.0)));
        assert_eq!(net.node("A").unwrap().position, Some(Position::new(3.0, 4.0)));
    }
}

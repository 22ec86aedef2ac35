//! Coordination between the main panel and an optional side panel.
//!
//! The coordinator is a small state machine, `Single -> Dual -> Single`:
//! opening a side panel enters `Dual`; closing it or merging it into the
//! main panel returns to `Single`. Cross-panel work (mirrored selection,
//! intersection highlighting, dual layout, merge) is only possible in
//! `Dual` and is rejected otherwise.

use super::panel::{PanelControls, PanelController, PanelId};
use super::shared::color::Color;
use super::shared::layout::LayoutName;
use super::shared::theme;
use super::surface::{LayoutTicket, RenderSurface};
use crate::models::network::union;
use crate::models::{NetworkData, Network, NodeIdSet};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Panel selection for operations that can address both panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTarget {
    Main,
    Side,
    Both,
}

impl PanelTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelTarget::Main => "main",
            PanelTarget::Side => "side",
            PanelTarget::Both => "both",
        }
    }
}

impl fmt::Display for PanelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PanelTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "main" => Ok(PanelTarget::Main),
            "side" => Ok(PanelTarget::Side),
            "both" => Ok(PanelTarget::Both),
            other => Err(Error::InvalidTarget(other.to_string())),
        }
    }
}

impl From<PanelId> for PanelTarget {
    fn from(id: PanelId) -> Self {
        match id {
            PanelId::Main => PanelTarget::Main,
            PanelId::Side => PanelTarget::Side,
        }
    }
}

/// Whether one or two panels are open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Single,
    Dual,
}

/// Settings the coordinator applies to cross-panel operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatorSettings {
    /// Fill of intersection nodes while highlighting is on
    pub highlight_color: Color,
    /// Layout for nodes outside the intersection in a dual layout
    pub fallback_layout: LayoutName,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            highlight_color: theme::panel::HIGHLIGHT,
            fallback_layout: LayoutName::Grid,
        }
    }
}

/// Which dual-only controls a host should enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DualControls {
    pub mode: Mode,
    pub merge_enabled: bool,
    pub highlight_enabled: bool,
    pub both_target_enabled: bool,
    pub highlight_active: bool,
}

/// Owns the main panel and zero-or-one side panel.
#[derive(Debug)]
pub struct DualPanelCoordinator<S: RenderSurface> {
    main: PanelController<S>,
    side: Option<PanelController<S>>,
    highlight: bool,
    /// Ids painted by the last highlight pass
    highlighted: NodeIdSet,
    settings: CoordinatorSettings,
}

impl<S: RenderSurface> DualPanelCoordinator<S> {
    pub fn new(main_surface: S) -> Self {
        Self::with_settings(main_surface, CoordinatorSettings::default())
    }

    pub fn with_settings(main_surface: S, settings: CoordinatorSettings) -> Self {
        Self {
            main: PanelController::new(PanelId::Main, main_surface),
            side: None,
            highlight: false,
            highlighted: NodeIdSet::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        if self.side.is_some() {
            Mode::Dual
        } else {
            Mode::Single
        }
    }

    pub fn main(&self) -> &PanelController<S> {
        &self.main
    }

    pub fn main_mut(&mut self) -> &mut PanelController<S> {
        &mut self.main
    }

    pub fn side(&self) -> Option<&PanelController<S>> {
        self.side.as_ref()
    }

    pub fn side_mut(&mut self) -> Option<&mut PanelController<S>> {
        self.side.as_mut()
    }

    pub fn is_highlighting(&self) -> bool {
        self.highlight
    }

    pub fn panel(&self, id: PanelId) -> Result<&PanelController<S>> {
        match id {
            PanelId::Main => Ok(&self.main),
            PanelId::Side => self.side.as_ref().ok_or(Error::NoSidePanel),
        }
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Result<&mut PanelController<S>> {
        match id {
            PanelId::Main => Ok(&mut self.main),
            PanelId::Side => self.side.as_mut().ok_or(Error::NoSidePanel),
        }
    }

    fn require_side(&self) -> Result<&PanelController<S>> {
        self.side.as_ref().ok_or_else(|| {
            tracing::warn!("Dual-panel operation rejected: no side panel");
            Error::NoSidePanel
        })
    }

    /// Open the side panel on `surface` showing `network`.
    ///
    /// An already open side panel is replaced.
    pub fn open_side(&mut self, surface: S, network: Network) {
        let mut side = PanelController::new(PanelId::Side, surface);
        side.load(network);
        self.side = Some(side);
        tracing::info!("Side panel opened, entering dual mode");
        self.main.resize();
        self.main.fit();
        if self.highlight {
            self.apply_highlight();
        }
    }

    /// Close the side panel and return to single mode.
    pub fn close_side(&mut self) -> Result<()> {
        self.require_side()?;
        self.side = None;
        if self.highlight {
            self.highlight = false;
            self.highlighted.clear();
            self.main.reset_styles();
        }
        self.main.resize();
        self.main.fit();
        tracing::info!("Side panel closed, back to single mode");
        Ok(())
    }

    /// Show `network` in one panel, re-applying intersection highlighting.
    pub fn load(&mut self, panel: PanelId, network: Network) -> Result<()> {
        self.panel_mut(panel)?.load(network);
        if self.highlight {
            self.apply_highlight();
        }
        Ok(())
    }

    /// Validate host data, then show it in one panel
    pub fn load_data(&mut self, panel: PanelId, data: NetworkData) -> Result<()> {
        self.panel(panel)?;
        let network = Network::from_data(data)?;
        self.load(panel, network)
    }

    fn mirror(&mut self, origin: PanelId, id: &str, select: bool) {
        let Some(other) = self.panel_mut(origin.other()).ok() else {
            return;
        };
        if !other.network().is_some_and(|n| n.contains(id)) {
            return;
        }
        let result = if select {
            other.select(id)
        } else {
            other.unselect(id)
        };
        if let Ok(true) = result {
            tracing::debug!(from = %origin, id, select, "Mirrored selection");
        }
    }

    /// Select a node, then the same node in the other panel if present.
    ///
    /// Nothing is mirrored when the origin selection did not change.
    pub fn select(&mut self, panel: PanelId, id: &str) -> Result<bool> {
        let changed = self.panel_mut(panel)?.select(id)?;
        if changed {
            self.mirror(panel, id, true);
        }
        Ok(changed)
    }

    /// Unselect a node, then the same node in the other panel if present.
    pub fn unselect(&mut self, panel: PanelId, id: &str) -> Result<bool> {
        let changed = self.panel_mut(panel)?.unselect(id)?;
        if changed {
            self.mirror(panel, id, false);
        }
        Ok(changed)
    }

    /// Select label matches in one panel, mirroring each new selection.
    pub fn search(&mut self, panel: PanelId, substring: &str) -> Result<NodeIdSet> {
        let origin = self.panel(panel)?;
        if origin.network().is_none() {
            return Err(Error::NoNetwork(panel.to_string()));
        }
        let matches = origin.matching(substring);
        for id in &matches {
            self.select(panel, id)?;
        }
        Ok(matches.into_iter().collect())
    }

    /// Node ids shown in both panels
    pub fn intersection(&self) -> Result<NodeIdSet> {
        let side = self.require_side()?;
        let main_net = self
            .main
            .network()
            .ok_or_else(|| Error::NoNetwork(PanelId::Main.to_string()))?;
        let side_net = side
            .network()
            .ok_or_else(|| Error::NoNetwork(PanelId::Side.to_string()))?;
        Ok(main_net.intersection(side_net))
    }

    /// Paint the current intersection, restoring nodes that left it
    fn apply_highlight(&mut self) {
        let Ok(ids) = self.intersection() else {
            return;
        };
        let stale: Vec<String> = self.highlighted.difference(&ids).cloned().collect();
        let color = self.settings.highlight_color;
        self.main.reset_node_styles(&stale);
        self.main.highlight(&ids, color);
        if let Some(side) = self.side.as_mut() {
            side.reset_node_styles(&stale);
            side.highlight(&ids, color);
        }
        tracing::debug!(nodes = ids.len(), restored = stale.len(), "Highlighted intersection");
        self.highlighted = ids;
    }

    /// Turn intersection highlighting on or off.
    ///
    /// Switching it off resets every node in both panels to its default
    /// style, which also drops weight coloring.
    pub fn set_intersection_highlight(&mut self, on: bool) -> Result<()> {
        if on {
            self.intersection()?;
            self.highlight = true;
            self.apply_highlight();
        } else {
            self.highlight = false;
            self.highlighted.clear();
            self.main.reset_styles();
            if let Some(side) = self.side.as_mut() {
                side.reset_styles();
            }
        }
        tracing::info!(on, "Intersection highlighting");
        Ok(())
    }

    /// Apply a layout to one panel, or a dual layout to both.
    ///
    /// For `Both`, `name` runs on the intersection and the fallback layout on
    /// the remaining nodes of each panel; both panels end up `Custom`.
    pub fn apply_layout(&mut self, target: PanelTarget, name: LayoutName) -> Result<Vec<LayoutTicket>> {
        match target {
            PanelTarget::Main => Ok(self.main.apply_layout(name)?.into_iter().collect()),
            PanelTarget::Side => {
                let side = self.side.as_mut().ok_or(Error::NoSidePanel)?;
                Ok(side.apply_layout(name)?.into_iter().collect())
            }
            PanelTarget::Both => {
                let ids = self.intersection()?;
                let fallback = self.settings.fallback_layout;
                let side = self.side.as_mut().ok_or(Error::NoSidePanel)?;
                if name.is_custom() {
                    self.main.apply_layout(name)?;
                    side.apply_layout(name)?;
                    return Ok(Vec::new());
                }
                tracing::info!(layout = %name, fallback = %fallback, shared = ids.len(), "Dual layout");
                let mut tickets = self.main.apply_partitioned_layout(name, &ids, fallback)?;
                tickets.extend(side.apply_partitioned_layout(name, &ids, fallback)?);
                Ok(tickets)
            }
        }
    }

    /// Show or hide hidden nodes of a single panel
    pub fn toggle_hidden(&mut self, target: PanelTarget, show: bool) -> Result<()> {
        match target {
            PanelTarget::Main => self.main.toggle_hidden(show),
            PanelTarget::Side => self.panel_mut(PanelId::Side)?.toggle_hidden(show),
            PanelTarget::Both => {
                tracing::warn!("Hidden-node toggle rejected for both panels");
                Err(Error::InvalidTarget(target.to_string()))
            }
        }
    }

    /// Merge the side network into the main panel and close the side panel.
    ///
    /// Rejected with no change unless both panels hold a network.
    pub fn merge(&mut self) -> Result<()> {
        let side = self.require_side()?;
        let side_net = side
            .network()
            .ok_or_else(|| Error::NoNetwork(PanelId::Side.to_string()))?;
        let main_net = self
            .main
            .network()
            .ok_or_else(|| Error::NoNetwork(PanelId::Main.to_string()))?;

        let merged = main_net.merge(side_net);
        let hidden = union(self.main.hidden(), side.hidden());
        tracing::info!(
            nodes = merged.len(),
            edges = merged.edges().len(),
            hidden = hidden.len(),
            "Merging side panel into main"
        );

        self.side = None;
        self.highlight = false;
        self.highlighted.clear();
        self.main.load_with_hidden(merged, hidden);
        self.main.resize();
        self.main.fit();
        Ok(())
    }

    /// Apply finished layout runs in every open panel
    pub fn poll_layouts(&mut self) -> usize {
        let mut applied = self.main.poll_layouts();
        if let Some(side) = self.side.as_mut() {
            applied += side.poll_layouts();
        }
        applied
    }

    pub fn controls(&self) -> DualControls {
        let dual = self.side.is_some();
        let both_loaded = self.main.network().is_some()
            && self.side.as_ref().is_some_and(|s| s.network().is_some());
        DualControls {
            mode: self.mode(),
            merge_enabled: both_loaded,
            highlight_enabled: dual,
            both_target_enabled: dual,
            highlight_active: self.highlight,
        }
    }

    /// Layout and show-hidden state to display for a panel selection.
    ///
    /// For `Both`, the layout shows only when the panels agree.
    pub fn panel_controls(&self, target: PanelTarget) -> Result<PanelControls> {
        match target {
            PanelTarget::Main => Ok(self.main.controls()),
            PanelTarget::Side => Ok(self.require_side()?.controls()),
            PanelTarget::Both => {
                let main = self.main.controls();
                let side = self.require_side()?.controls();
                Ok(PanelControls {
                    layout: if main.layout == side.layout {
                        main.layout
                    } else {
                        LayoutName::Custom
                    },
                    show_hidden: main.show_hidden && side.show_hidden,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::headless::HeadlessSurface;
    use crate::gui::shared::layout::{Bounds, LayoutConfig, compute_layout, LayoutNode};
    use crate::models::{Edge, Node, NodeType};

    fn ids(list: &[&str]) -> NodeIdSet {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn network(title: &str, nodes: &[&str], edges: &[(&str, &str)]) -> Network {
        Network::new(
            title,
            edges.iter().map(|(a, b)| Edge::new(*a, *b)).collect(),
            nodes.iter().map(|id| Node::new(*id, NodeType::Gene)).collect(),
        )
        .unwrap()
    }

    /// main {A,B}, side {B,C}, everything connected
    fn dual() -> DualPanelCoordinator<HeadlessSurface> {
        let mut coord = DualPanelCoordinator::new(HeadlessSurface::new());
        coord
            .load(PanelId::Main, network("main", &["A", "B"], &[("A", "B")]))
            .unwrap();
        coord.open_side(
            HeadlessSurface::new(),
            network("side", &["B", "C"], &[("B", "C")]),
        );
        coord
    }

    #[test]
    fn test_mode_transitions() {
        let mut coord = dual();
        assert_eq!(coord.mode(), Mode::Dual);
        coord.close_side().unwrap();
        assert_eq!(coord.mode(), Mode::Single);
        assert!(matches!(coord.close_side(), Err(Error::NoSidePanel)));
    }

    #[test]
    fn test_selection_mirrors_to_side() {
        let mut coord = dual();
        assert!(coord.select(PanelId::Main, "B").unwrap());
        assert!(coord.side().unwrap().surface().is_selected("B"));

        // A is not in the side panel
        assert!(coord.select(PanelId::Main, "A").unwrap());
        assert_eq!(coord.side().unwrap().selection(), &ids(&["B"]));

        assert!(coord.unselect(PanelId::Side, "B").unwrap());
        assert!(!coord.main().surface().is_selected("B"));
    }

    #[test]
    fn test_unchanged_selection_does_not_mirror() {
        let mut coord = dual();
        coord.side_mut().unwrap().select("B").unwrap();
        coord.main_mut().select("B").unwrap();
        coord.side_mut().unwrap().unselect("B").unwrap();

        // already selected in main: nothing propagates to the side panel
        assert!(!coord.select(PanelId::Main, "B").unwrap());
        assert!(!coord.side().unwrap().surface().is_selected("B"));
    }

    #[test]
    fn test_select_after_side_closed() {
        let mut coord = dual();
        coord.close_side().unwrap();
        assert!(coord.select(PanelId::Main, "A").unwrap());
        assert!(matches!(
            coord.select(PanelId::Side, "B"),
            Err(Error::NoSidePanel)
        ));
    }

    #[test]
    fn test_search_mirrors_matches() {
        let mut coord = dual();
        let found = coord.search(PanelId::Side, "B").unwrap();
        assert_eq!(found, ids(&["B"]));
        assert!(coord.main().surface().is_selected("B"));
    }

    #[test]
    fn test_intersection_and_highlight() {
        let mut coord = dual();
        assert_eq!(coord.intersection().unwrap(), ids(&["B"]));

        coord.set_intersection_highlight(true).unwrap();
        let highlight = theme::panel::HIGHLIGHT;
        assert_eq!(coord.main().surface().style("B").unwrap().background, highlight);
        assert_eq!(coord.side().unwrap().surface().style("B").unwrap().background, highlight);
        assert_ne!(coord.main().surface().style("A").unwrap().background, highlight);

        coord.set_intersection_highlight(false).unwrap();
        assert_eq!(coord.main().surface().style("B").unwrap().background, theme::node::GENE);
        assert!(!coord.is_highlighting());
    }

    #[test]
    fn test_highlight_requires_side_panel() {
        let mut coord = DualPanelCoordinator::new(HeadlessSurface::new());
        coord
            .load(PanelId::Main, network("main", &["A"], &[]))
            .unwrap();
        assert!(matches!(
            coord.set_intersection_highlight(true),
            Err(Error::NoSidePanel)
        ));
        assert!(!coord.is_highlighting());
    }

    #[test]
    fn test_load_reapplies_highlight() {
        let mut coord = dual();
        coord.set_intersection_highlight(true).unwrap();
        coord
            .load(PanelId::Side, network("side2", &["A", "C"], &[("A", "C")]))
            .unwrap();
        let highlight = theme::panel::HIGHLIGHT;
        assert_eq!(coord.main().surface().style("A").unwrap().background, highlight);
        assert_eq!(coord.side().unwrap().surface().style("A").unwrap().background, highlight);
    }

    #[test]
    fn test_reload_restores_nodes_leaving_intersection() {
        let mut coord = dual();
        coord.set_intersection_highlight(true).unwrap();
        coord
            .load(PanelId::Main, network("main2", &["A", "C"], &[("A", "C")]))
            .unwrap();

        assert_eq!(coord.intersection().unwrap(), ids(&["C"]));
        let side = coord.side().unwrap();
        let highlight = theme::panel::HIGHLIGHT;
        assert_eq!(side.surface().style("C").unwrap().background, highlight);
        assert_eq!(side.surface().style("B").unwrap().background, theme::node::GENE);
        assert!(!side.state().styles.contains_key("B"));
    }

    #[test]
    fn test_close_side_switches_highlight_off() {
        let mut coord = dual();
        coord.set_intersection_highlight(true).unwrap();
        let resizes = coord.main().surface().resize_count();
        coord.close_side().unwrap();
        assert!(!coord.is_highlighting());
        assert_eq!(coord.main().surface().style("B").unwrap().background, theme::node::GENE);
        assert_eq!(coord.main().surface().resize_count(), resizes + 1);
        assert!(!coord.controls().merge_enabled);
    }

    #[test]
    fn test_merge() {
        let mut coord = DualPanelCoordinator::new(HeadlessSurface::new());
        coord
            .load(PanelId::Main, network("main", &["A", "B", "X"], &[("A", "B")]))
            .unwrap();
        coord.open_side(
            HeadlessSurface::new(),
            network("side", &["B", "C", "Y"], &[("B", "C")]),
        );
        coord.merge().unwrap();

        assert_eq!(coord.mode(), Mode::Single);
        let merged = coord.main().network().unwrap();
        assert_eq!(merged.node_ids(), ids(&["A", "B", "C", "X", "Y"]));
        assert_eq!(merged.title(), "main");
        assert_eq!(coord.main().hidden(), &ids(&["X", "Y"]));
        assert_eq!(coord.main().layout(), LayoutName::Custom);
        assert_eq!(coord.main().surface().visible_ids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_merge_rejected_without_side_network() {
        let mut coord = DualPanelCoordinator::new(HeadlessSurface::new());
        coord
            .load(PanelId::Main, network("main", &["A"], &[]))
            .unwrap();
        assert!(matches!(coord.merge(), Err(Error::NoSidePanel)));

        let mut coord = DualPanelCoordinator::new(HeadlessSurface::new());
        coord.open_side(HeadlessSurface::new(), network("side", &["B"], &[]));
        assert!(matches!(coord.merge(), Err(Error::NoNetwork(p)) if p == "main"));
        assert_eq!(coord.mode(), Mode::Dual);
    }

    #[test]
    fn test_dual_layout_places_intersection_with_requested_layout() {
        let mut coord = dual();
        let tickets = coord.apply_layout(PanelTarget::Both, LayoutName::Circle).unwrap();
        assert_eq!(tickets.len(), 4);
        assert_eq!(coord.main().layout(), LayoutName::Custom);
        assert_eq!(coord.side().unwrap().layout(), LayoutName::Custom);

        let side_fits = coord.side().unwrap().surface().fit_count();
        assert_eq!(coord.poll_layouts(), 4);
        assert_eq!(coord.side().unwrap().surface().fit_count(), side_fits + 1);

        let requested = coord.main().surface().requested_layouts();
        assert_eq!(requested[0].1, LayoutName::Circle);
        assert_eq!(requested[1].1, LayoutName::Grid);

        // B alone in the circle region lands on its center
        let region = Bounds::for_count(0.0, 0.0, 1, 80.0);
        let expected = compute_layout(
            LayoutName::Circle,
            &[LayoutNode::new("B")],
            &[],
            Some(region),
            &LayoutConfig::default(),
        );
        let main_b = coord.main().network().unwrap().node("B").unwrap().position;
        let side_b = coord.side().unwrap().network().unwrap().node("B").unwrap().position;
        assert_eq!(main_b, Some(expected[0].1));
        assert_eq!(side_b, main_b);

        let a = coord.main().network().unwrap().node("A").unwrap().position.unwrap();
        let c = coord.side().unwrap().network().unwrap().node("C").unwrap().position.unwrap();
        assert!(a.x > region.width);
        assert!(c.x > region.width);
    }

    #[test]
    fn test_dual_layout_aligns_panels_when_shared_node_hidden() {
        let mut coord = DualPanelCoordinator::new(HeadlessSurface::new());
        coord
            .load(PanelId::Main, network("main", &["A", "B", "C"], &[("A", "B"), ("B", "C")]))
            .unwrap();
        coord.open_side(
            HeadlessSurface::new(),
            network("side", &["B", "C", "D"], &[("B", "C"), ("C", "D")]),
        );
        coord.main_mut().hide_nodes(["C"]).unwrap();

        coord.apply_layout(PanelTarget::Both, LayoutName::Grid).unwrap();
        coord.poll_layouts();

        let main = coord.main().network().unwrap();
        let side = coord.side().unwrap().network().unwrap();
        let pos = |net: &Network, id: &str| net.node(id).unwrap().position;
        assert_eq!(pos(main, "B"), pos(side, "B"));
        assert!(pos(side, "C").is_some());
        assert_eq!(pos(main, "C"), None);
        // both fallback regions start after a region sized for {B, C}
        let region = Bounds::for_count(0.0, 0.0, 2, 80.0);
        assert_eq!(pos(main, "A"), pos(side, "D"));
        assert!(pos(main, "A").unwrap().x > region.width);
    }

    #[test]
    fn test_dual_layout_requires_side_panel() {
        let mut coord = DualPanelCoordinator::new(HeadlessSurface::new());
        coord
            .load(PanelId::Main, network("main", &["A", "B"], &[("A", "B")]))
            .unwrap();
        assert!(matches!(
            coord.apply_layout(PanelTarget::Both, LayoutName::Grid),
            Err(Error::NoSidePanel)
        ));
        assert!(coord.main().surface().requested_layouts().is_empty());
    }

    #[test]
    fn test_toggle_hidden_targets() {
        let mut coord = DualPanelCoordinator::new(HeadlessSurface::new());
        coord
            .load(PanelId::Main, network("main", &["A", "B", "C"], &[("A", "B")]))
            .unwrap();
        coord.toggle_hidden(PanelTarget::Main, true).unwrap();
        assert!(coord.main().surface().is_visible("C"));
        coord.toggle_hidden(PanelTarget::Main, false).unwrap();
        assert!(!coord.main().surface().is_visible("C"));

        assert!(matches!(
            coord.toggle_hidden(PanelTarget::Both, true),
            Err(Error::InvalidTarget(_))
        ));
        assert!(matches!(
            coord.toggle_hidden(PanelTarget::Side, true),
            Err(Error::NoSidePanel)
        ));
    }

    #[test]
    fn test_controls() {
        let mut coord = dual();
        let controls = coord.controls();
        assert_eq!(controls.mode, Mode::Dual);
        assert!(controls.merge_enabled && controls.both_target_enabled);

        coord.apply_layout(PanelTarget::Main, LayoutName::Grid).unwrap();
        assert_eq!(
            coord.panel_controls(PanelTarget::Both).unwrap().layout,
            LayoutName::Custom
        );
        coord.apply_layout(PanelTarget::Side, LayoutName::Grid).unwrap();
        assert_eq!(
            coord.panel_controls(PanelTarget::Both).unwrap().layout,
            LayoutName::Grid
        );

        coord.close_side().unwrap();
        assert!(!coord.controls().both_target_enabled);
        assert!(coord.panel_controls(PanelTarget::Both).is_err());
    }

    #[test]
    fn test_panel_target_parse() {
        assert_eq!("Both".parse::<PanelTarget>().unwrap(), PanelTarget::Both);
        assert!(matches!(
            "left".parse::<PanelTarget>(),
            Err(Error::InvalidTarget(t)) if t == "left"
        ));
    }
}

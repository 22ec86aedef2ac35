//! The rendering-engine capability a panel drives.
//!
//! Layout is two-phase: [`RenderSurface::request_layout`] returns at once and
//! the finished positions come back later from
//! [`RenderSurface::take_completed_layouts`]. Nothing may assume a request
//! completes before the caller returns. A surface never moves nodes on its
//! own: accepted positions are pushed back with [`RenderSurface::set_position`].

use super::shared::layout::{Bounds, LayoutEdge, LayoutName, LayoutNode, Position};
use super::shared::render::{NodeStyle, RenderableElements};
use serde::Serialize;

/// Identifier of one requested layout run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LayoutTicket(pub u64);

/// A layout run handed to the surface
#[derive(Debug, Clone)]
pub struct LayoutRequest {
    pub ticket: LayoutTicket,
    pub layout: LayoutName,
    /// Nodes to place, with their current positions
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Region to place nodes in; the surface picks one when `None`
    pub bounds: Option<Bounds>,
}

/// Positions produced by a finished layout run
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    pub ticket: LayoutTicket,
    pub positions: Vec<(String, Position)>,
}

/// A graph rendering engine bound to one container.
pub trait RenderSurface {
    /// Remove every element
    fn clear(&mut self);

    /// Replace the element set
    fn install(&mut self, elements: &RenderableElements);

    /// Show or hide one node and its incident edges
    fn set_visible(&mut self, id: &str, visible: bool);

    fn set_style(&mut self, id: &str, style: &NodeStyle);

    fn set_selected(&mut self, id: &str, selected: bool);

    fn set_label(&mut self, id: &str, label: &str);

    fn set_position(&mut self, id: &str, position: Position);

    /// Start a layout run. Completion is reported through
    /// [`take_completed_layouts`](Self::take_completed_layouts).
    fn request_layout(&mut self, request: LayoutRequest);

    /// Abandon a requested run; its outcome is never reported
    fn cancel_layout(&mut self, ticket: LayoutTicket);

    /// Drain layout runs that have finished since the last call
    fn take_completed_layouts(&mut self) -> Vec<LayoutOutcome>;

    /// Frame all visible elements
    fn fit(&mut self);

    /// Recompute the viewport after the container changed size
    fn resize(&mut self);
}

//! Panel state machine for network visualization
//!
//! A [`PanelController`] drives one rendering surface; the
//! [`DualPanelCoordinator`] holds the main panel and an optional side panel
//! and implements everything that spans both.

pub mod coordinator;
pub mod headless;
pub mod panel;
pub mod surface;

/// Rendering-agnostic building blocks
///
/// Colors, layouts, themes and render commands shared by every surface.
pub mod shared;

pub use coordinator::{
    CoordinatorSettings, DualControls, DualPanelCoordinator, Mode, PanelTarget,
};
pub use headless::HeadlessSurface;
pub use panel::{ColorByWeight, NodeColoring, PanelControls, PanelController, PanelId, PanelState};
pub use surface::{LayoutOutcome, LayoutRequest, LayoutTicket, RenderSurface};

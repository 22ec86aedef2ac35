//! Rendering-agnostic pieces shared by every panel surface
//!
//! # Modules
//!
//! - `color`: RGB colors, the weight color scale and HSV helpers
//! - `theme`: Default node colors and shapes as Rust constants
//! - `layout`: Layout names and position computation (grid, circle, concentric, force)
//! - `render`: Renderable elements, abstract render commands and SVG output

pub mod color;
pub mod layout;
pub mod render;
pub mod theme;

pub use color::*;
pub use layout::*;
pub use render::*;
pub use theme::*;

//! Renderable elements and abstract rendering commands for network panels
//!
//! A panel hands its surface a [`RenderableElements`] set: nodes with their
//! style, position and hidden flag, and edges. For snapshots the same set can
//! be turned into backend-neutral [`RenderCommand`]s and written out as SVG.
//!
//! # Node Shapes
//!
//! Shapes follow the usual graph-viewer vocabulary: ellipse, rectangle,
//! round-rectangle, triangle, diamond, pentagon and hexagon.

use super::color::Color;
use super::layout::{Bounds, Position};
use super::theme;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::Write as _;

/// Node shape type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    #[default]
    Ellipse,
    Rectangle,
    RoundRectangle,
    Triangle,
    Diamond,
    Pentagon,
    Hexagon,
}

impl NodeShape {
    /// Parse a shape name (kebab-case, case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ellipse" | "circle" => Some(Self::Ellipse),
            "rectangle" => Some(Self::Rectangle),
            "round-rectangle" | "roundrectangle" => Some(Self::RoundRectangle),
            "triangle" => Some(Self::Triangle),
            "diamond" => Some(Self::Diamond),
            "pentagon" => Some(Self::Pentagon),
            "hexagon" => Some(Self::Hexagon),
            _ => None,
        }
    }
}

/// Visual style of one rendered node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub background: Color,
    pub border: Color,
    pub shape: NodeShape,
}

/// A node as handed to a rendering surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub position: Option<Position>,
    pub style: NodeStyle,
    pub hidden: bool,
}

/// An edge as handed to a rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    /// Hidden whenever either endpoint is hidden
    pub hidden: bool,
}

/// The element set a panel installs on its surface
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderableElements {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderableElements {
    /// Nodes not currently hidden
    pub fn visible_nodes(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter().filter(|n| !n.hidden)
    }
}

/// A render command that can be executed on any rendering backend
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Fill the whole canvas
    Clear { color: Color },
    /// Draw a filled ellipse
    FillEllipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        color: Color,
    },
    /// Draw a stroked ellipse
    StrokeEllipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        color: Color,
        line_width: f64,
    },
    /// Draw a filled path
    FillPath { points: Vec<PathPoint>, color: Color },
    /// Draw a stroked path
    StrokePath {
        points: Vec<PathPoint>,
        color: Color,
        line_width: f64,
    },
    /// Draw a line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        line_width: f64,
    },
    /// Draw centered text
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Color,
        font_size: f64,
    },
}

/// A point in a path, which can be a line or a curve
#[derive(Debug, Clone, PartialEq)]
pub enum PathPoint {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticTo { cx: f64, cy: f64, x: f64, y: f64 },
    Close,
}

/// Sizes used when drawing a snapshot
#[derive(Debug, Clone)]
pub struct SnapshotStyle {
    pub node_radius: f64,
    pub border_width: f64,
    pub edge_width: f64,
    pub font_size: f64,
    /// Margin around the enclosing bounds of all drawn nodes
    pub padding: f64,
}

impl Default for SnapshotStyle {
    fn default() -> Self {
        Self {
            node_radius: 15.0,
            border_width: 2.0,
            edge_width: 1.5,
            font_size: 10.0,
            padding: 40.0,
        }
    }
}

/// Regular polygon with `sides` corners, first corner at `rotation` radians
pub fn polygon_path(cx: f64, cy: f64, radius: f64, sides: usize, rotation: f64) -> Vec<PathPoint> {
    let mut points = Vec::with_capacity(sides + 1);
    for i in 0..sides {
        let angle = rotation + (i as f64) * 2.0 * PI / sides as f64;
        let x = cx + radius * angle.cos();
        let y = cy + radius * angle.sin();
        if i == 0 {
            points.push(PathPoint::MoveTo { x, y });
        } else {
            points.push(PathPoint::LineTo { x, y });
        }
    }
    points.push(PathPoint::Close);
    points
}

/// Generate path points for a rounded square shape
pub fn round_rectangle_path(cx: f64, cy: f64, radius: f64) -> Vec<PathPoint> {
    let half = radius;
    let corner = radius * 0.3;

    vec![
        PathPoint::MoveTo {
            x: cx - half + corner,
            y: cy - half,
        },
        PathPoint::LineTo {
            x: cx + half - corner,
            y: cy - half,
        },
        PathPoint::QuadraticTo {
            cx: cx + half,
            cy: cy - half,
            x: cx + half,
            y: cy - half + corner,
        },
        PathPoint::LineTo {
            x: cx + half,
            y: cy + half - corner,
        },
        PathPoint::QuadraticTo {
            cx: cx + half,
            cy: cy + half,
            x: cx + half - corner,
            y: cy + half,
        },
        PathPoint::LineTo {
            x: cx - half + corner,
            y: cy + half,
        },
        PathPoint::QuadraticTo {
            cx: cx - half,
            cy: cy + half,
            x: cx - half,
            y: cy + half - corner,
        },
        PathPoint::LineTo {
            x: cx - half,
            y: cy - half + corner,
        },
        PathPoint::QuadraticTo {
            cx: cx - half,
            cy: cy - half,
            x: cx - half + corner,
            y: cy - half,
        },
        PathPoint::Close,
    ]
}

/// Get the outline of a non-elliptic node shape
pub fn node_shape_path(shape: NodeShape, cx: f64, cy: f64, radius: f64) -> Vec<PathPoint> {
    match shape {
        NodeShape::Rectangle => polygon_path(cx, cy, radius * 2f64.sqrt(), 4, PI / 4.0),
        NodeShape::RoundRectangle => round_rectangle_path(cx, cy, radius),
        NodeShape::Triangle => polygon_path(cx, cy, radius, 3, -PI / 2.0),
        NodeShape::Diamond => polygon_path(cx, cy, radius, 4, -PI / 2.0),
        NodeShape::Pentagon => polygon_path(cx, cy, radius, 5, -PI / 2.0),
        NodeShape::Hexagon => polygon_path(cx, cy, radius, 6, -PI / 6.0),
        NodeShape::Ellipse => polygon_path(cx, cy, radius, 32, 0.0),
    }
}

/// Generate render commands for one node
pub fn render_node(node: &RenderNode, position: Position, style: &SnapshotStyle) -> Vec<RenderCommand> {
    let r = style.node_radius;
    let mut commands = match node.style.shape {
        NodeShape::Ellipse => vec![
            RenderCommand::FillEllipse {
                cx: position.x,
                cy: position.y,
                rx: r,
                ry: r,
                color: node.style.background,
            },
            RenderCommand::StrokeEllipse {
                cx: position.x,
                cy: position.y,
                rx: r,
                ry: r,
                color: node.style.border,
                line_width: style.border_width,
            },
        ],
        shape => {
            let path = node_shape_path(shape, position.x, position.y, r);
            vec![
                RenderCommand::FillPath {
                    points: path.clone(),
                    color: node.style.background,
                },
                RenderCommand::StrokePath {
                    points: path,
                    color: node.style.border,
                    line_width: style.border_width,
                },
            ]
        }
    };
    commands.push(RenderCommand::Text {
        x: position.x,
        y: position.y + r + style.font_size + 2.0,
        text: node.label.clone(),
        color: theme::panel::LABEL,
        font_size: style.font_size,
    });
    commands
}

/// Generate render commands for every visible, positioned element.
///
/// Edges are drawn first so nodes sit on top of them.
pub fn render_elements(elements: &RenderableElements, style: &SnapshotStyle) -> Vec<RenderCommand> {
    let mut commands = vec![RenderCommand::Clear {
        color: theme::panel::BACKGROUND,
    }];

    let position_of = |id: &str| {
        elements
            .nodes
            .iter()
            .find(|n| n.id == id && !n.hidden)
            .and_then(|n| n.position)
    };

    for edge in elements.edges.iter().filter(|e| !e.hidden) {
        if let (Some(from), Some(to)) = (position_of(&edge.source), position_of(&edge.target)) {
            commands.push(RenderCommand::Line {
                x1: from.x,
                y1: from.y,
                x2: to.x,
                y2: to.y,
                color: theme::panel::EDGE,
                line_width: style.edge_width,
            });
        }
    }

    for node in elements.visible_nodes() {
        if let Some(position) = node.position {
            commands.extend(render_node(node, position, style));
        }
    }
    commands
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn svg_path_data(points: &[PathPoint]) -> String {
    let mut d = String::new();
    for point in points {
        let _ = match point {
            PathPoint::MoveTo { x, y } => write!(d, "M{:.2} {:.2} ", x, y),
            PathPoint::LineTo { x, y } => write!(d, "L{:.2} {:.2} ", x, y),
            PathPoint::QuadraticTo { cx, cy, x, y } => {
                write!(d, "Q{:.2} {:.2} {:.2} {:.2} ", cx, cy, x, y)
            }
            PathPoint::Close => write!(d, "Z"),
        };
    }
    d.trim_end().to_string()
}

/// Write render commands as an SVG document covering `view`
pub fn to_svg(commands: &[RenderCommand], view: Bounds) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}">"#,
        view.x, view.y, view.width, view.height
    );
    for command in commands {
        let _ = match command {
            RenderCommand::Clear { color } => writeln!(
                svg,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                view.x, view.y, view.width, view.height, color
            ),
            RenderCommand::FillEllipse {
                cx,
                cy,
                rx,
                ry,
                color,
            } => writeln!(
                svg,
                r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="{}"/>"#,
                cx, cy, rx, ry, color
            ),
            RenderCommand::StrokeEllipse {
                cx,
                cy,
                rx,
                ry,
                color,
                line_width,
            } => writeln!(
                svg,
                r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
                cx, cy, rx, ry, color, line_width
            ),
            RenderCommand::FillPath { points, color } => writeln!(
                svg,
                r#"<path d="{}" fill="{}"/>"#,
                svg_path_data(points),
                color
            ),
            RenderCommand::StrokePath {
                points,
                color,
                line_width,
            } => writeln!(
                svg,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
                svg_path_data(points),
                color,
                line_width
            ),
            RenderCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                line_width,
            } => writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
                x1, y1, x2, y2, color, line_width
            ),
            RenderCommand::Text {
                x,
                y,
                text,
                color,
                font_size,
            } => writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" fill="{}" font-size="{:.1}" text-anchor="middle">{}</text>"#,
                x,
                y,
                color,
                font_size,
                escape_xml(text)
            ),
        };
    }
    svg.push_str("</svg>\n");
    svg
}

/// Render visible elements to a standalone SVG sized to fit them
pub fn elements_to_svg(elements: &RenderableElements, style: &SnapshotStyle) -> String {
    let positions: Vec<Position> = elements
        .visible_nodes()
        .filter_map(|n| n.position)
        .collect();
    let view = Bounds::enclosing(positions.iter())
        .map(|b| {
            Bounds::new(
                b.x - style.padding,
                b.y - style.padding,
                b.width + 2.0 * style.padding,
                b.height + 2.0 * style.padding,
            )
        })
        .unwrap_or_else(|| Bounds::new(0.0, 0.0, 2.0 * style.padding, 2.0 * style.padding));
    to_svg(&render_elements(elements, style), view)
}

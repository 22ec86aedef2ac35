//! CLI argument definitions for netviz.

use crate::gui::shared::color::Color;
use crate::gui::shared::layout::LayoutName;
use crate::models::NodeType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// netviz - Inspect, lay out, color and combine biological interaction networks.
///
/// Networks are JSON files shaped `{title, interactions, nodes}`.
#[derive(Parser, Debug)]
#[command(name = "nv")]
#[command(author, version, about = "Headless dual-panel network visualization", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Path to config.kdl (default: ~/.config/netviz/config.kdl).
    /// Can also be set via NV_CONFIG environment variable.
    #[arg(long = "config", global = true, env = "NV_CONFIG")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a network: counts, unconnected nodes, components
    Inspect {
        /// Network JSON file
        file: PathBuf,
    },

    /// List node ids present in both networks
    Intersect {
        /// Network shown in the main panel
        main: PathBuf,
        /// Network shown in the side panel
        side: PathBuf,
    },

    /// Merge the side network into the main one
    ///
    /// Nodes present in both keep the main network's attributes.
    Merge {
        /// Network shown in the main panel
        main: PathBuf,
        /// Network shown in the side panel
        side: PathBuf,
        /// Write the merged network JSON here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a layout and print node positions
    ///
    /// With --side, runs a dual layout: the layout places nodes shared by both
    /// networks, the fallback layout places the rest.
    Layout {
        /// Network JSON file
        file: PathBuf,
        /// Second network for a dual layout
        #[arg(long)]
        side: Option<PathBuf>,
        /// Layout name: grid, circle, concentric, force or custom (default from config)
        #[arg(short, long)]
        layout: Option<LayoutName>,
        /// Include hidden (unconnected) nodes
        #[arg(long)]
        show_hidden: bool,
        /// Write the laid-out main network JSON here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Color nodes by a numeric weight
    Color {
        /// Network JSON file
        file: PathBuf,
        /// Weight name to read from each node
        #[arg(short, long)]
        weight: String,
        /// Low end of the scale (default: smallest observed value)
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,
        /// High end of the scale (default: largest observed value)
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,
        /// Value mapped to white (default: midpoint)
        #[arg(long, allow_hyphen_values = true)]
        threshold: Option<f64>,
        /// Color of the low end, #RRGGBB
        #[arg(long)]
        neg: Option<Color>,
        /// Color of the high end, #RRGGBB (default: the hue opposite --neg
        /// when only --neg is given)
        #[arg(long)]
        pos: Option<Color>,
        /// Node type that reads --alt-weight instead (e.g. miRNA)
        #[arg(long, requires = "alt_weight")]
        alt_type: Option<NodeType>,
        /// Weight read by nodes of --alt-type
        #[arg(long, requires = "alt_type")]
        alt_weight: Option<String>,
    },

    /// Select nodes whose label contains a substring (case-sensitive)
    Search {
        /// Network JSON file
        file: PathBuf,
        /// Substring to look for in labels
        substring: String,
        /// Second network; matches are mirrored into it
        #[arg(long)]
        side: Option<PathBuf>,
    },

    /// Lay out a network and write an SVG snapshot
    Render {
        /// Network JSON file
        file: PathBuf,
        /// Layout name (default from config)
        #[arg(short, long)]
        layout: Option<LayoutName>,
        /// Include hidden (unconnected) nodes
        #[arg(long)]
        show_hidden: bool,
        /// SVG output path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show version, git commit and build time
    Version,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved settings and where each came from
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout_command() {
        let cli = Cli::try_parse_from([
            "nv", "-H", "layout", "a.json", "--side", "b.json", "-l", "circle",
        ])
        .unwrap();
        assert!(cli.human_readable);
        match cli.command {
            Commands::Layout { side, layout, .. } => {
                assert_eq!(side, Some(PathBuf::from("b.json")));
                assert_eq!(layout, Some(LayoutName::Circle));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_color_negative_bounds() {
        let cli = Cli::try_parse_from([
            "nv", "color", "a.json", "-w", "fold", "--min", "-2.5", "--max", "2.5", "--neg",
            "#00ff00",
        ])
        .unwrap();
        match cli.command {
            Commands::Color { min, max, neg, .. } => {
                assert_eq!(min, Some(-2.5));
                assert_eq!(max, Some(2.5));
                assert_eq!(neg, Some(Color::rgb(0, 255, 0)));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_alt_type_requires_alt_weight() {
        let result = Cli::try_parse_from(["nv", "color", "a.json", "-w", "fold", "--alt-type", "miRNA"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let result = Cli::try_parse_from(["nv", "render", "a.json", "-l", "spiral", "-o", "x.svg"]);
        assert!(result.is_err());
    }
}

//! Color themes for the architecture diagram.
//!
//! A [`Theme`] is a palette only. The diagram content is fixed; swapping the
//! theme recolors clusters, nodes and edges without touching the topology.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use archsketch_core::color::Color;

/// Built-in theme selector, as written in config files and on the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light text on a dark navy background.
    #[default]
    Dark,
    /// Dark text on a near-white background.
    Light,
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme `{other}` (expected dark or light)")),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

/// Colors of a cluster box.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPalette {
    pub border: Color,
    pub fill: Color,
    pub title: Color,
}

/// Colors of a node and the text inside its table.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePalette {
    pub fill: Color,
    pub border: Color,
    /// Bold table heading.
    pub heading: Color,
    /// Secondary lines right under the heading.
    pub detail: Color,
    /// Regular cell text.
    pub text: Color,
    /// Italic footnotes.
    pub note: Color,
}

/// Line and label color of one kind of data flow.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowPalette {
    pub line: Color,
    pub label: Color,
}

/// Edge colors, one entry per kind of data flow in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Flows {
    /// Traffic inside the mobile app.
    pub mobile_internal: FlowPalette,
    /// Mobile to backend REST calls.
    pub https: FlowPalette,
    /// Middleware to route handlers.
    pub pipeline: FlowPalette,
    /// SignalR push and broadcast.
    pub realtime: FlowPalette,
    /// Cosmos DB access.
    pub database: FlowPalette,
    /// Blob storage access.
    pub storage: FlowPalette,
}

/// Complete palette for the architecture diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub title: Color,
    /// Default color of edge labels.
    pub edge_label: Color,

    pub mobile: ClusterPalette,
    pub mobile_nodes: NodePalette,

    pub backend: ClusterPalette,
    pub backend_nodes: NodePalette,

    pub azure: ClusterPalette,
    pub cosmos: NodePalette,
    pub signalr: NodePalette,
    pub blob: NodePalette,

    pub flows: Flows,
}

fn palette_color(hex: &str) -> Color {
    Color::new(hex).expect("built-in palette colors are valid")
}

fn cluster(border: &str, fill: &str, title: &str) -> ClusterPalette {
    ClusterPalette {
        border: palette_color(border),
        fill: palette_color(fill),
        title: palette_color(title),
    }
}

fn node(fill: &str, border: &str, heading: &str, detail: &str, text: &str, note: &str) -> NodePalette {
    NodePalette {
        fill: palette_color(fill),
        border: palette_color(border),
        heading: palette_color(heading),
        detail: palette_color(detail),
        text: palette_color(text),
        note: palette_color(note),
    }
}

fn flow(line: &str, label: &str) -> FlowPalette {
    FlowPalette {
        line: palette_color(line),
        label: palette_color(label),
    }
}

impl Theme {
    /// Returns the built-in theme with the given name.
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// The stock palette: navy background, green mobile cluster, slate
    /// backend and teal Azure services.
    pub fn dark() -> Self {
        Self {
            background: palette_color("#1a1a2e"),
            title: palette_color("white"),
            edge_label: palette_color("#cccccc"),

            mobile: cluster("#2d6a4f", "#1b4332", "#95d5b2"),
            mobile_nodes: node("#2d6a4f", "#40916c", "#b7e4c7", "#b7e4c7", "white", "#95d5b2"),

            backend: cluster("#4a4e69", "#22223b", "#c9ada7"),
            backend_nodes: node("#2b2d42", "#4a4e69", "#9a8c98", "#9a8c98", "#f2e9e4", "#c9ada7"),

            azure: cluster("#005f73", "#001219", "#94d2bd"),
            cosmos: node("#023e8a", "#0077b6", "#90e0ef", "#caf0f8", "white", "#90e0ef"),
            signalr: node("#3c096c", "#7b2cbf", "#e0aaff", "#d0bfff", "white", "#e0aaff"),
            blob: node("#6c3428", "#e76f51", "#f4a261", "#ffd6a5", "white", "#f4a261"),

            flows: Flows {
                mobile_internal: flow("#52b788", "#95d5b2"),
                https: flow("#40916c", "#95d5b2"),
                pipeline: flow("#4a4e69", "#9a8c98"),
                realtime: flow("#9d4edd", "#e0aaff"),
                database: flow("#0096c7", "#90e0ef"),
                storage: flow("#e76f51", "#f4a261"),
            },
        }
    }

    /// A print-friendly palette with the same hues on a light background.
    pub fn light() -> Self {
        Self {
            background: palette_color("#f8f9fa"),
            title: palette_color("#212529"),
            edge_label: palette_color("#495057"),

            mobile: cluster("#40916c", "#d8f3dc", "#1b4332"),
            mobile_nodes: node("#b7e4c7", "#2d6a4f", "#081c15", "#1b4332", "#1b4332", "#2d6a4f"),

            backend: cluster("#4a4e69", "#f2e9e4", "#22223b"),
            backend_nodes: node("#dcd6f7", "#4a4e69", "#22223b", "#4a4e69", "#2b2d42", "#4a4e69"),

            azure: cluster("#0a9396", "#e0fbfc", "#005f73"),
            cosmos: node("#caf0f8", "#0077b6", "#03045e", "#023e8a", "#023e8a", "#0077b6"),
            signalr: node("#f3e8ff", "#7b2cbf", "#3c096c", "#5a189a", "#3c096c", "#7b2cbf"),
            blob: node("#ffe8d6", "#e76f51", "#6c3428", "#9c4221", "#6c3428", "#e76f51"),

            flows: Flows {
                mobile_internal: flow("#2d6a4f", "#1b4332"),
                https: flow("#40916c", "#1b4332"),
                pipeline: flow("#4a4e69", "#22223b"),
                realtime: flow("#7b2cbf", "#5a189a"),
                database: flow("#0077b6", "#023e8a"),
                storage: flow("#e76f51", "#9c4221"),
            },
        }
    }

    /// Replaces the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

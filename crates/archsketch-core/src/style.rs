//! Style vocabulary for graphs, clusters, nodes and edges.
//!
//! Each type here maps one-to-one onto a Graphviz attribute value. The
//! mapping lives in the `dot_value` methods; the export layer never spells an
//! attribute value by hand.
//!
//! | Type          | Graphviz attribute | Example values              |
//! |---------------|--------------------|-----------------------------|
//! | [`RankDir`]   | `rankdir`          | `TB`, `LR`                  |
//! | [`Splines`]   | `splines`          | `curved`, `ortho`           |
//! | [`LabelLoc`]  | `labelloc`         | `t`, `b`                    |
//! | [`NodeShape`] | `shape`            | `box`, `cylinder`           |
//! | [`BoxStyle`]  | `style` (nodes, clusters) | `rounded,filled`     |
//! | [`EdgeStyle`] | `style` (edges)    | `dashed`, `invis`           |
//! | [`Direction`] | `dir`              | `forward`, `both`           |

use std::fmt;

use crate::color::Color;

/// Direction in which ranks are laid out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RankDir {
    #[default]
    TopBottom,
    LeftRight,
    BottomTop,
    RightLeft,
}

impl RankDir {
    pub fn dot_value(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
            Self::BottomTop => "BT",
            Self::RightLeft => "RL",
        }
    }
}

/// How edges are drawn between nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Splines {
    #[default]
    Spline,
    Curved,
    Ortho,
    Polyline,
    Line,
}

impl Splines {
    pub fn dot_value(self) -> &'static str {
        match self {
            Self::Spline => "spline",
            Self::Curved => "curved",
            Self::Ortho => "ortho",
            Self::Polyline => "polyline",
            Self::Line => "line",
        }
    }
}

/// Vertical placement of a graph or cluster label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LabelLoc {
    Top,
    #[default]
    Bottom,
}

impl LabelLoc {
    pub fn dot_value(self) -> &'static str {
        match self {
            Self::Top => "t",
            Self::Bottom => "b",
        }
    }
}

/// Outline shape of a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    #[default]
    Box,
    Ellipse,
    Plaintext,
    Cylinder,
    Note,
}

impl NodeShape {
    pub fn dot_value(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Ellipse => "ellipse",
            Self::Plaintext => "plaintext",
            Self::Cylinder => "cylinder",
            Self::Note => "note",
        }
    }
}

/// Fill and corner style shared by nodes and clusters.
///
/// Graphviz takes these as a comma separated list, so both flags can be set
/// at once.
///
/// ```
/// use archsketch_core::style::BoxStyle;
///
/// assert_eq!(BoxStyle::rounded_filled().dot_value(), Some("rounded,filled".to_string()));
/// assert_eq!(BoxStyle::default().dot_value(), None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    rounded: bool,
    filled: bool,
}

impl BoxStyle {
    pub fn new(rounded: bool, filled: bool) -> Self {
        Self { rounded, filled }
    }

    /// The `rounded,filled` style used for every box in the architecture diagram.
    pub fn rounded_filled() -> Self {
        Self::new(true, true)
    }

    pub fn is_rounded(&self) -> bool {
        self.rounded
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Returns the `style` attribute value, or `None` when no flag is set.
    pub fn dot_value(&self) -> Option<String> {
        let flags: Vec<&str> = [(self.rounded, "rounded"), (self.filled, "filled")]
            .into_iter()
            .filter_map(|(set, name)| set.then_some(name))
            .collect();

        (!flags.is_empty()).then(|| flags.join(","))
    }
}

/// Line pattern of an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
    /// Not drawn, but still takes part in layout.
    Invisible,
}

impl EdgeStyle {
    /// Returns the `style` attribute value, or `None` for the Graphviz default.
    pub fn dot_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("dashed"),
            Self::Dotted => Some("dotted"),
            Self::Bold => Some("bold"),
            Self::Invisible => Some("invis"),
        }
    }

    pub fn is_invisible(self) -> bool {
        matches!(self, Self::Invisible)
    }
}

/// Which ends of an edge carry an arrowhead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Back,
    Both,
    None,
}

impl Direction {
    /// Returns the `dir` attribute value, or `None` for the digraph default.
    pub fn dot_value(self) -> Option<&'static str> {
        match self {
            Self::Forward => None,
            Self::Back => Some("back"),
            Self::Both => Some("both"),
            Self::None => Some("none"),
        }
    }
}

/// Font face, size and color.
///
/// Every field is optional; unset fields inherit from the enclosing scope.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Font {
    name: Option<String>,
    size: Option<f32>,
    color: Option<Color>,
}

impl Font {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn size(&self) -> Option<f32> {
        self.size
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

/// Formats a floating point attribute the way Graphviz expects it: no
/// trailing `.0` on whole numbers.
///
/// ```
/// use archsketch_core::style::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(0.35), "0.35");
/// ```
pub fn format_number(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dot_value())
    }
}

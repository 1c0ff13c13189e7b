//! Node, cluster and edge labels.
//!
//! A [`Label`] is either plain text or a Graphviz HTML-like [`Table`]. Tables
//! are assembled from [`Row`]s of [`Cell`]s, and each cell holds one or more
//! formatted [`Span`]s.
//!
//! ```
//! use archsketch_core::{color::Color, label::{Cell, Row, Span, Table}};
//!
//! let white = Color::new("white").unwrap();
//! let table = Table::new()
//!     .with_cell_spacing(4)
//!     .with_row(Row::new().with_cell(Cell::new(Span::new("Storage").bold()).with_colspan(2)))
//!     .with_row(Row::from_texts(["SQLite", "SecureStore"], white));
//!
//! let html = table.to_html();
//! assert!(html.starts_with("<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"4\">"));
//! assert!(html.contains("<TD COLSPAN=\"2\"><B>Storage</B></TD>"));
//! ```

use std::fmt::Write;

use crate::{color::Color, style::format_number};

/// Text content of a graph element.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Plain text. Line breaks are preserved.
    Text(String),
    /// An HTML-like table.
    Table(Table),
}

impl Label {
    /// Returns every piece of visible text in the label, in document order.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Label::Text(text) => vec![text.as_str()],
            Label::Table(table) => table
                .rows
                .iter()
                .flat_map(|row| row.cells.iter())
                .flat_map(|cell| cell.spans.iter())
                .map(|span| span.text.as_str())
                .collect(),
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::Text(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label::Text(text)
    }
}

impl From<Table> for Label {
    fn from(table: Table) -> Self {
        Label::Table(table)
    }
}

/// Horizontal alignment of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn html_value(self) -> &'static str {
        match self {
            Align::Left => "LEFT",
            Align::Center => "CENTER",
            Align::Right => "RIGHT",
        }
    }
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    color: Option<Color>,
    point_size: Option<f32>,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            color: None,
            point_size: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = Some(size);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    fn write_html(&self, out: &mut String) {
        let has_font = self.color.is_some() || self.point_size.is_some();

        if has_font {
            out.push_str("<FONT");
            if let Some(color) = self.color {
                let _ = write!(out, " COLOR=\"{color}\"");
            }
            if let Some(size) = self.point_size {
                let _ = write!(out, " POINT-SIZE=\"{}\"", format_number(size));
            }
            out.push('>');
        }
        if self.bold {
            out.push_str("<B>");
        }
        if self.italic {
            out.push_str("<I>");
        }

        out.push_str(&escape_html(&self.text));

        if self.italic {
            out.push_str("</I>");
        }
        if self.bold {
            out.push_str("</B>");
        }
        if has_font {
            out.push_str("</FONT>");
        }
    }
}

/// A table cell. A cell without spans renders as an empty `<TD></TD>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    spans: Vec<Span>,
    colspan: u32,
    align: Option<Align>,
}

impl Cell {
    pub fn new(span: Span) -> Self {
        Self {
            spans: vec![span],
            colspan: 1,
            align: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            spans: Vec::new(),
            colspan: 1,
            align: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn colspan(&self) -> u32 {
        self.colspan
    }

    fn write_html(&self, out: &mut String) {
        out.push_str("<TD");
        if self.colspan > 1 {
            let _ = write!(out, " COLSPAN=\"{}\"", self.colspan);
        }
        if let Some(align) = self.align {
            let _ = write!(out, " ALIGN=\"{}\"", align.html_value());
        }
        out.push('>');
        for span in &self.spans {
            span.write_html(out);
        }
        out.push_str("</TD>");
    }
}

/// A table row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row of single-span cells that all share one text color.
    pub fn from_texts<'a>(texts: impl IntoIterator<Item = &'a str>, color: Color) -> Self {
        Self {
            cells: texts
                .into_iter()
                .map(|text| Cell::new(Span::new(text).with_color(color)))
                .collect(),
        }
    }

    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of grid columns the row occupies, counting column spans.
    pub fn width(&self) -> u32 {
        self.cells.iter().map(Cell::colspan).sum()
    }
}

/// An HTML-like table label.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    border: u32,
    cell_border: u32,
    cell_spacing: u32,
    rows: Vec<Row>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            border: 0,
            cell_border: 0,
            cell_spacing: 4,
            rows: Vec::new(),
        }
    }
}

impl Table {
    /// Creates a borderless table with a cell spacing of 4.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn with_cell_border(mut self, cell_border: u32) -> Self {
        self.cell_border = cell_border;
        self
    }

    pub fn with_cell_spacing(mut self, cell_spacing: u32) -> Self {
        self.cell_spacing = cell_spacing;
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Renders the table as Graphviz HTML-like markup, without the outer `<>`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<TABLE BORDER=\"{}\" CELLBORDER=\"{}\" CELLSPACING=\"{}\">",
            self.border, self.cell_border, self.cell_spacing
        );
        for row in &self.rows {
            out.push_str("<TR>");
            for cell in &row.cells {
                cell.write_html(&mut out);
            }
            out.push_str("</TR>");
        }
        out.push_str("</TABLE>");
        out
    }
}

/// Escapes text for use inside an HTML-like label.
///
/// Line breaks become `<BR/>` elements.
///
/// ```
/// use archsketch_core::label::escape_html;
///
/// assert_eq!(escape_html("jobs & users"), "jobs &amp; users");
/// assert_eq!(escape_html("a\nb"), "a<BR/>b");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<BR/>"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes text for use inside a double-quoted DOT string.
///
/// Quotes and backslashes are escaped and line breaks become the `\n` escape
/// that Graphviz renders as a centered line break. The result does not
/// include the surrounding quotes.
///
/// ```
/// use archsketch_core::label::escape_quoted;
///
/// assert_eq!(escape_quoted("offline cache\n+ token storage"), "offline cache\\n+ token storage");
/// assert_eq!(escape_quoted("say \"hi\""), "say \\\"hi\\\"");
/// ```
pub fn escape_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

//! Conversion of an archsketch [`Graph`] into Graphviz DOT.
//!
//! The graph is first mapped onto the `dot-structures` AST and then printed
//! with the `graphviz-rust` printer, so quoting and statement layout follow a
//! single implementation. Every value goes through [`value`], which picks the
//! bare, quoted or HTML form.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph as DotGraph, GraphAttributes as DotAttributes,
    Id as DotId, Node as DotNode, NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::{debug, trace};

use archsketch_core::{
    graph::{Cluster, Edge, Graph, Node},
    identifier::{Id, is_plain_identifier},
    label::{Label, escape_quoted},
    style::{Font, format_number},
};

use super::{Error, Exporter};

/// Exporter producing the DOT source itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export(&self, graph: &Graph) -> Result<Vec<u8>, Error> {
        to_dot_string(graph).map(String::into_bytes)
    }
}

/// Validates `graph` and prints it as DOT text.
///
/// # Errors
///
/// Returns [`Error::Graph`] if an edge references an undeclared node.
pub fn to_dot_string(graph: &Graph) -> Result<String, Error> {
    let dot_graph = to_dot_graph(graph)?;
    let text = dot_graph.print(&mut PrinterContext::default());

    debug!(bytes = text.len(); "DOT source generated");
    trace!(dot = text.as_str(); "DOT source");

    Ok(text)
}

/// Validates `graph` and converts it to the `dot-structures` AST.
///
/// # Errors
///
/// Returns [`Error::Graph`] if an edge references an undeclared node.
pub fn to_dot_graph(graph: &Graph) -> Result<DotGraph, Error> {
    graph.validate()?;

    let mut stmts = vec![
        Stmt::GAttribute(DotAttributes::Graph(graph_attributes(graph))),
        Stmt::GAttribute(DotAttributes::Node(node_defaults(graph))),
        Stmt::GAttribute(DotAttributes::Edge(edge_defaults(graph))),
    ];

    stmts.extend(
        graph
            .clusters()
            .map(|cluster| Stmt::Subgraph(cluster_subgraph(graph, cluster))),
    );
    stmts.extend(graph.top_level_nodes().map(|node| Stmt::Node(dot_node(node))));
    stmts.extend(graph.edges().iter().map(|edge| Stmt::Edge(dot_edge(edge))));

    Ok(DotGraph::DiGraph {
        id: identifier(graph.name()),
        strict: false,
        stmts,
    })
}

const KEYWORDS: [&str; 6] = ["graph", "digraph", "subgraph", "node", "edge", "strict"];

fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text.to_ascii_lowercase().as_str())
}

/// Maps an attribute value onto the DOT id form that needs the least quoting.
///
/// Identifiers and numerals are written bare; anything else, DOT keywords
/// included, is quoted.
fn value(text: &str) -> DotId {
    let is_identifier = is_plain_identifier(text) && !is_keyword(text);
    let is_numeral = !text.is_empty()
        && text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.chars().filter(|&c| c == '.').count() <= 1
        && text != ".";

    if is_identifier || is_numeral {
        DotId::Plain(text.to_string())
    } else {
        DotId::Escaped(format!("\"{}\"", escape_quoted(text)))
    }
}

fn identifier(id: Id) -> DotId {
    value(&id.to_string())
}

fn label(label: &Label) -> DotId {
    match label {
        Label::Text(text) => DotId::Escaped(format!("\"{}\"", escape_quoted(text))),
        Label::Table(table) => DotId::Html(format!("<{}>", table.to_html())),
    }
}

fn attr(key: &str, value: DotId) -> Attribute {
    Attribute(DotId::Plain(key.to_string()), value)
}

/// Appends `fontname`, `fontsize` and `fontcolor` for the fields that are set.
fn push_font(attrs: &mut Vec<Attribute>, font: &Font) {
    if let Some(name) = font.name() {
        attrs.push(attr("fontname", value(name)));
    }
    if let Some(size) = font.size() {
        attrs.push(attr("fontsize", value(&format_number(size))));
    }
    if let Some(color) = font.color() {
        attrs.push(attr("fontcolor", value(&color.to_hex())));
    }
}

fn graph_attributes(graph: &Graph) -> Vec<Attribute> {
    let attributes = graph.attributes();
    let mut attrs = Vec::new();

    if let Some(rank_dir) = attributes.rank_dir {
        attrs.push(attr("rankdir", value(rank_dir.dot_value())));
    }
    if let Some(background) = attributes.background {
        attrs.push(attr("bgcolor", value(&background.to_hex())));
    }
    push_font(&mut attrs, &attributes.font);
    if let Some(text) = &attributes.label {
        attrs.push(attr("label", label(text)));
    }
    if let Some(loc) = attributes.label_loc {
        attrs.push(attr("labelloc", value(loc.dot_value())));
    }
    if let Some(pad) = attributes.pad {
        attrs.push(attr("pad", value(&format_number(pad))));
    }
    if let Some(node_sep) = attributes.node_sep {
        attrs.push(attr("nodesep", value(&format_number(node_sep))));
    }
    if let Some(rank_sep) = attributes.rank_sep {
        attrs.push(attr("ranksep", value(&format_number(rank_sep))));
    }
    if let Some(dpi) = attributes.dpi {
        attrs.push(attr("dpi", value(&dpi.to_string())));
    }
    if let Some(splines) = attributes.splines {
        attrs.push(attr("splines", value(splines.dot_value())));
    }
    if attributes.compound {
        attrs.push(attr("compound", value("true")));
    }

    attrs
}

fn node_defaults(graph: &Graph) -> Vec<Attribute> {
    let defaults = graph.node_defaults();
    let mut attrs = Vec::new();

    if let Some(shape) = defaults.shape {
        attrs.push(attr("shape", value(shape.dot_value())));
    }
    if let Some(style) = defaults.style.dot_value() {
        attrs.push(attr("style", value(&style)));
    }
    push_font(&mut attrs, &defaults.font);
    if let Some((x, y)) = defaults.margin {
        let margin = format!("{},{}", format_number(x), format_number(y));
        attrs.push(attr("margin", value(&margin)));
    }

    attrs
}

fn edge_defaults(graph: &Graph) -> Vec<Attribute> {
    let mut attrs = Vec::new();
    push_font(&mut attrs, &graph.edge_defaults().font);
    attrs
}

fn cluster_subgraph(graph: &Graph, cluster: &Cluster) -> Subgraph {
    let style = cluster.style();
    let mut attrs = Vec::new();

    if let Some(text) = cluster.label() {
        attrs.push(attr("label", label(text)));
    }
    if let Some(box_style) = style.style.dot_value() {
        attrs.push(attr("style", value(&box_style)));
    }
    if let Some(border) = style.border {
        attrs.push(attr("color", value(&border.to_hex())));
    }
    if let Some(fill) = style.fill {
        attrs.push(attr("fillcolor", value(&fill.to_hex())));
    }
    push_font(&mut attrs, &style.font);

    let mut stmts: Vec<Stmt> = attrs.into_iter().map(Stmt::Attribute).collect();
    stmts.extend(
        graph
            .cluster_nodes(cluster.id())
            .map(|node| Stmt::Node(dot_node(node))),
    );

    Subgraph {
        id: identifier(cluster.id().with_prefix("cluster_")),
        stmts,
    }
}

fn dot_node(node: &Node) -> DotNode {
    let style = node.style();
    let mut attrs = vec![attr("label", label(node.label()))];

    if let Some(shape) = style.shape {
        attrs.push(attr("shape", value(shape.dot_value())));
    }
    if let Some(fill) = style.fill {
        attrs.push(attr("fillcolor", value(&fill.to_hex())));
    }
    if let Some(border) = style.border {
        attrs.push(attr("color", value(&border.to_hex())));
    }
    if let Some(font_color) = style.font_color {
        attrs.push(attr("fontcolor", value(&font_color.to_hex())));
    }

    DotNode {
        id: NodeId(identifier(node.id()), None),
        attributes: attrs,
    }
}

fn dot_edge(edge: &Edge) -> DotEdge {
    let mut attrs = Vec::new();

    if let Some(text) = edge.label() {
        attrs.push(attr("label", label(text)));
    }
    if let Some(color) = edge.color() {
        attrs.push(attr("color", value(&color.to_hex())));
    }
    if let Some(font_color) = edge.font_color() {
        attrs.push(attr("fontcolor", value(&font_color.to_hex())));
    }
    if let Some(dir) = edge.direction().dot_value() {
        attrs.push(attr("dir", value(dir)));
    }
    if let Some(pen_width) = edge.pen_width() {
        attrs.push(attr("penwidth", value(&format_number(pen_width))));
    }
    if let Some(style) = edge.style().dot_value() {
        attrs.push(attr("style", value(style)));
    }

    DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(NodeId(identifier(edge.from()), None)),
            Vertex::N(NodeId(identifier(edge.to()), None)),
        ),
        attributes: attrs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use archsketch_core::{
        color::Color,
        graph::{ClusterStyle, NodeStyle},
        label::{Cell, Row, Span, Table},
        style::{BoxStyle, Direction, EdgeStyle},
    };

    fn small_graph() -> Graph {
        let mut graph = Graph::new(Id::new("Small"));
        graph
            .add_cluster(
                Cluster::new(Id::new("azure"))
                    .with_label("  AZURE  ")
                    .with_style(ClusterStyle {
                        style: BoxStyle::rounded_filled(),
                        fill: Some(Color::new("#001219").unwrap()),
                        ..ClusterStyle::default()
                    }),
            )
            .unwrap();
        graph
            .add_node(
                Node::new(
                    Id::new("blob"),
                    Table::new().with_row(Row::new().with_cell(Cell::new(Span::new("Blob").bold()))),
                )
                .in_cluster(Id::new("azure"))
                .with_style(NodeStyle {
                    fill: Some(Color::new("#6c3428").unwrap()),
                    ..NodeStyle::default()
                }),
            )
            .unwrap();
        graph.add_node(Node::new(Id::new("routes"), "Routes")).unwrap();
        graph.add_edge(
            Edge::new(Id::new("routes"), Id::new("blob"))
                .with_label("  SDK  \n  (upload/delete photos)  ")
                .with_pen_width(2.5)
                .with_direction(Direction::Both)
                .with_style(EdgeStyle::Dashed),
        );
        graph
    }

    #[test]
    fn test_value_quoting() {
        assert_eq!(value("LR"), DotId::Plain("LR".to_string()));
        assert_eq!(value("0.35"), DotId::Plain("0.35".to_string()));
        assert_eq!(value("150"), DotId::Plain("150".to_string()));
        assert_eq!(value("#1a1a2e"), DotId::Escaped("\"#1a1a2e\"".to_string()));
        assert_eq!(
            value("rounded,filled"),
            DotId::Escaped("\"rounded,filled\"".to_string())
        );
        assert_eq!(value(""), DotId::Escaped("\"\"".to_string()));
        assert_eq!(value("1.2.3"), DotId::Escaped("\"1.2.3\"".to_string()));
        assert_eq!(value("node"), DotId::Escaped("\"node\"".to_string()));
        assert_eq!(value("Edge"), DotId::Escaped("\"Edge\"".to_string()));
    }

    #[test]
    fn test_identifiers_quote_like_values() {
        assert_eq!(
            identifier(Id::new("local_storage")),
            DotId::Plain("local_storage".to_string())
        );
        assert_eq!(
            identifier(Id::new("api routes")),
            DotId::Escaped("\"api routes\"".to_string())
        );
        assert_eq!(
            identifier(Id::new("subgraph")),
            DotId::Escaped("\"subgraph\"".to_string())
        );
    }

    #[test]
    fn test_cluster_gets_prefixed_subgraph() {
        let text = to_dot_string(&small_graph()).unwrap();
        assert!(text.contains("subgraph cluster_azure"));
        assert!(text.contains("fillcolor=\"#001219\""));
        assert!(text.contains("style=\"rounded,filled\""));
    }

    #[test]
    fn test_labels_are_encoded() {
        let text = to_dot_string(&small_graph()).unwrap();
        assert!(text.contains("label=<<TABLE"));
        assert!(text.contains("<B>Blob</B>"));
        assert!(text.contains("\"  SDK  \\n  (upload/delete photos)  \""));
        assert!(text.contains("label=\"Routes\""));
    }

    #[test]
    fn test_edge_attributes() {
        let text = to_dot_string(&small_graph()).unwrap();
        assert!(text.contains("routes -> blob"));
        assert!(text.contains("penwidth=2.5"));
        assert!(text.contains("dir=both"));
        assert!(text.contains("style=dashed"));
    }

    #[test]
    fn test_nodes_appear_once() {
        let dot_graph = to_dot_graph(&small_graph()).unwrap();
        let DotGraph::DiGraph { stmts, .. } = dot_graph else {
            panic!("expected a digraph");
        };

        let top_level_nodes = stmts
            .iter()
            .filter(|stmt| matches!(stmt, Stmt::Node(_)))
            .count();
        let subgraphs = stmts
            .iter()
            .filter(|stmt| matches!(stmt, Stmt::Subgraph(_)))
            .count();
        assert_eq!(top_level_nodes, 1);
        assert_eq!(subgraphs, 1);
    }

    #[test]
    fn test_invalid_graph_is_rejected() {
        let mut graph = small_graph();
        graph.add_edge(Edge::new(Id::new("routes"), Id::new("cosmos")));
        assert!(matches!(to_dot_string(&graph), Err(Error::Graph(_))));
    }

    #[test]
    fn test_dot_exporter_matches_string() {
        let graph = small_graph();
        let bytes = DotExporter.export(&graph).unwrap();
        assert_eq!(bytes, to_dot_string(&graph).unwrap().into_bytes());
    }
}

//! In-memory graph description.
//!
//! A [`Graph`] collects global attributes, per-element defaults, clusters,
//! nodes and edges in declaration order. It is built once, validated, and
//! handed to an exporter.
//!
//! # Example
//!
//! ```
//! use archsketch_core::{
//!     graph::{Cluster, Edge, Graph, Node},
//!     identifier::Id,
//!     style::Direction,
//! };
//!
//! let mut graph = Graph::new(Id::new("Demo"));
//! graph.add_cluster(Cluster::new(Id::new("mobile")).with_label("Mobile")).unwrap();
//! graph.add_node(Node::new(Id::new("app"), "App").in_cluster(Id::new("mobile"))).unwrap();
//! graph.add_node(Node::new(Id::new("api"), "API")).unwrap();
//! graph.add_edge(Edge::new(Id::new("app"), Id::new("api")).with_direction(Direction::Both));
//!
//! assert!(graph.validate().is_ok());
//! assert_eq!(graph.cluster_nodes(Id::new("mobile")).count(), 1);
//! ```

use indexmap::IndexMap;
use log::debug;

use crate::{
    color::Color,
    error::{Endpoint, GraphError},
    identifier::Id,
    label::Label,
    style::{BoxStyle, Direction, EdgeStyle, Font, LabelLoc, NodeShape, RankDir, Splines},
};

/// Attributes that apply to the whole graph.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GraphAttributes {
    pub rank_dir: Option<RankDir>,
    pub background: Option<Color>,
    pub font: Font,
    pub label: Option<Label>,
    pub label_loc: Option<LabelLoc>,
    /// Margin around the drawing, in inches.
    pub pad: Option<f32>,
    /// Minimum space between nodes of the same rank, in inches.
    pub node_sep: Option<f32>,
    /// Minimum space between ranks, in inches.
    pub rank_sep: Option<f32>,
    pub dpi: Option<u32>,
    pub splines: Option<Splines>,
    /// Allow edges between clusters.
    pub compound: bool,
}

/// Defaults applied to every node unless the node overrides them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NodeDefaults {
    pub shape: Option<NodeShape>,
    pub style: BoxStyle,
    pub font: Font,
    /// Horizontal and vertical label margin, in inches.
    pub margin: Option<(f32, f32)>,
}

/// Defaults applied to every edge unless the edge overrides them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EdgeDefaults {
    pub font: Font,
}

/// Visual style of a cluster box.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClusterStyle {
    pub style: BoxStyle,
    pub border: Option<Color>,
    pub fill: Option<Color>,
    pub font: Font,
}

/// A labeled, styled group of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: Id,
    label: Option<Label>,
    style: ClusterStyle,
}

impl Cluster {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            label: None,
            style: ClusterStyle::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: ClusterStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn style(&self) -> &ClusterStyle {
        &self.style
    }
}

/// Per-node style overrides.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NodeStyle {
    pub shape: Option<NodeShape>,
    pub fill: Option<Color>,
    pub border: Option<Color>,
    pub font_color: Option<Color>,
}

/// A labeled box in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: Label,
    style: NodeStyle,
    cluster: Option<Id>,
}

impl Node {
    pub fn new(id: Id, label: impl Into<Label>) -> Self {
        Self {
            id,
            label: label.into(),
            style: NodeStyle::default(),
            cluster: None,
        }
    }

    /// Places the node inside the cluster with the given id.
    pub fn in_cluster(mut self, cluster: Id) -> Self {
        self.cluster = Some(cluster);
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn cluster(&self) -> Option<Id> {
        self.cluster
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: Id,
    to: Id,
    label: Option<Label>,
    color: Option<Color>,
    font_color: Option<Color>,
    pen_width: Option<f32>,
    direction: Direction,
    style: EdgeStyle,
}

impl Edge {
    pub fn new(from: Id, to: Id) -> Self {
        Self {
            from,
            to,
            label: None,
            color: None,
            font_color: None,
            pen_width: None,
            direction: Direction::default(),
            style: EdgeStyle::default(),
        }
    }

    /// An invisible edge that only biases the layout.
    pub fn layout_hint(from: Id, to: Id) -> Self {
        Self::new(from, to).with_style(EdgeStyle::Invisible)
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    pub fn with_pen_width(mut self, width: f32) -> Self {
        self.pen_width = Some(width);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn font_color(&self) -> Option<Color> {
        self.font_color
    }

    pub fn pen_width(&self) -> Option<f32> {
        self.pen_width
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }
}

/// A directed graph with clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    name: Id,
    attributes: GraphAttributes,
    node_defaults: NodeDefaults,
    edge_defaults: EdgeDefaults,
    clusters: IndexMap<Id, Cluster>,
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(name: Id) -> Self {
        Self {
            name,
            attributes: GraphAttributes::default(),
            node_defaults: NodeDefaults::default(),
            edge_defaults: EdgeDefaults::default(),
            clusters: IndexMap::new(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn set_attributes(&mut self, attributes: GraphAttributes) {
        self.attributes = attributes;
    }

    pub fn set_node_defaults(&mut self, defaults: NodeDefaults) {
        self.node_defaults = defaults;
    }

    pub fn set_edge_defaults(&mut self, defaults: EdgeDefaults) {
        self.edge_defaults = defaults;
    }

    /// Declares a cluster.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateCluster`] if a cluster with the same id
    /// already exists.
    pub fn add_cluster(&mut self, cluster: Cluster) -> Result<(), GraphError> {
        if self.clusters.contains_key(&cluster.id) {
            return Err(GraphError::DuplicateCluster(cluster.id));
        }
        self.clusters.insert(cluster.id, cluster);
        Ok(())
    }

    /// Declares a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if the id is taken, or
    /// [`GraphError::UnknownCluster`] if the node names a cluster that has not
    /// been declared yet.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        if let Some(cluster) = node.cluster {
            if !self.clusters.contains_key(&cluster) {
                return Err(GraphError::UnknownCluster {
                    node: node.id,
                    cluster,
                });
            }
        }
        self.nodes.insert(node.id, node);
        Ok(())
    }

    /// Appends an edge.
    ///
    /// Endpoints may name nodes declared later; they are checked by
    /// [`Graph::validate`].
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Checks that every edge endpoint names a declared node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownEdgeEndpoint`] for the first offending
    /// edge, in declaration order.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (index, edge) in self.edges.iter().enumerate() {
            for (endpoint, id) in [(Endpoint::Source, edge.from), (Endpoint::Target, edge.to)] {
                if !self.nodes.contains_key(&id) {
                    return Err(GraphError::UnknownEdgeEndpoint {
                        index,
                        from: edge.from,
                        to: edge.to,
                        endpoint,
                        missing: id,
                    });
                }
            }
        }

        debug!(
            graph = self.name.to_string(),
            clusters = self.clusters.len(),
            nodes = self.nodes.len(),
            edges = self.edges.len();
            "Graph validated"
        );
        Ok(())
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn attributes(&self) -> &GraphAttributes {
        &self.attributes
    }

    pub fn node_defaults(&self) -> &NodeDefaults {
        &self.node_defaults
    }

    pub fn edge_defaults(&self) -> &EdgeDefaults {
        &self.edge_defaults
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.values()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Nodes placed in the given cluster, in declaration order.
    pub fn cluster_nodes(&self, cluster: Id) -> impl Iterator<Item = &Node> {
        self.nodes
            .values()
            .filter(move |node| node.cluster == Some(cluster))
    }

    /// Nodes that are not placed in any cluster, in declaration order.
    pub fn top_level_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|node| node.cluster.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut graph = Graph::new(Id::new("Sample"));
        graph
            .add_cluster(Cluster::new(Id::new("backend")).with_label("Backend"))
            .unwrap();
        graph
            .add_node(Node::new(Id::new("middleware"), "Middleware").in_cluster(Id::new("backend")))
            .unwrap();
        graph
            .add_node(Node::new(Id::new("routes"), "Routes").in_cluster(Id::new("backend")))
            .unwrap();
        graph.add_node(Node::new(Id::new("cosmos"), "Cosmos")).unwrap();
        graph
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = sample();
        let err = graph
            .add_node(Node::new(Id::new("routes"), "Again"))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode(Id::new("routes")));
    }

    #[test]
    fn test_duplicate_cluster_rejected() {
        let mut graph = sample();
        let err = graph
            .add_cluster(Cluster::new(Id::new("backend")))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateCluster(Id::new("backend")));
    }

    #[test]
    fn test_unknown_cluster_rejected() {
        let mut graph = sample();
        let err = graph
            .add_node(Node::new(Id::new("blob"), "Blob").in_cluster(Id::new("azure")))
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownCluster { .. }));
    }

    #[test]
    fn test_edges_may_reference_later_nodes() {
        let mut graph = Graph::new(Id::new("Forward"));
        graph.add_edge(Edge::new(Id::new("a"), Id::new("b")));
        graph.add_node(Node::new(Id::new("a"), "A")).unwrap();
        graph.add_node(Node::new(Id::new("b"), "B")).unwrap();
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_endpoint() {
        let mut graph = sample();
        graph.add_edge(Edge::new(Id::new("middleware"), Id::new("routes")));
        graph.add_edge(Edge::new(Id::new("routes"), Id::new("signalr")));

        let err = graph.validate().unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownEdgeEndpoint {
                index: 1,
                from: Id::new("routes"),
                to: Id::new("signalr"),
                endpoint: Endpoint::Target,
                missing: Id::new("signalr"),
            }
        );
        assert_eq!(
            err.to_string(),
            "edge #1 (routes -> signalr): target `signalr` is not a declared node"
        );
    }

    #[test]
    fn test_validate_reports_missing_source_first() {
        let mut graph = sample();
        graph.add_edge(Edge::new(Id::new("ghost"), Id::new("phantom")));

        let err = graph.validate().unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnknownEdgeEndpoint {
                endpoint: Endpoint::Source,
                ..
            }
        ));
    }

    #[test]
    fn test_cluster_membership_preserves_order() {
        let graph = sample();
        let members: Vec<String> = graph
            .cluster_nodes(Id::new("backend"))
            .map(|node| node.id().to_string())
            .collect();
        assert_eq!(members, vec!["middleware", "routes"]);

        let top: Vec<String> = graph
            .top_level_nodes()
            .map(|node| node.id().to_string())
            .collect();
        assert_eq!(top, vec!["cosmos"]);
    }

    #[test]
    fn test_layout_hint_is_invisible() {
        let edge = Edge::layout_hint(Id::new("cosmos"), Id::new("signalr"));
        assert!(edge.style().is_invisible());
        assert!(edge.label().is_none());
    }
}

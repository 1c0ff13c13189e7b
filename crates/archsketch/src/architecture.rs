//! The RetailFixIt system architecture.
//!
//! Three clusters (mobile client, Express backend, Azure services), eight
//! nodes and eleven edges, two of which are invisible layout hints. The
//! content is fixed; colors come from the [`Theme`].

use archsketch_core::{
    color::Color,
    error::GraphError,
    graph::{
        Cluster, ClusterStyle, Edge, EdgeDefaults, Graph, GraphAttributes, Node, NodeDefaults,
        NodeStyle,
    },
    identifier::Id,
    label::{Align, Cell, Row, Span, Table},
    style::{BoxStyle, Direction, EdgeStyle, Font, LabelLoc, NodeShape, RankDir, Splines},
};

use crate::theme::{ClusterPalette, FlowPalette, NodePalette, Theme};

/// Name of the generated graph.
pub const DIAGRAM_NAME: &str = "RetailFixIt";

/// File name, without extension, the diagram is written to by default.
pub const OUTPUT_STEM: &str = "architecture_diagram";

/// Font used when none is configured.
pub const DEFAULT_FONT: &str = "Helvetica";

const TITLE: &str = "RetailFixIt — System Architecture\n\
                     Mobile-First Retail Repair Platform (React Native + Express + Azure)\n";

const API_ROUTES: [&str; 13] = [
    "GET  /api/health",
    "POST /api/auth/login",
    "GET  /api/auth/technicians",
    "GET  /api/jobs",
    "GET  /api/jobs/:id",
    "POST /api/jobs",
    "PATCH /api/jobs/:id/status",
    "POST /api/jobs/:id/assign",
    "DELETE /api/jobs/:id",
    "POST /api/jobs/sync",
    "POST /api/jobs/:id/attachments",
    "DELETE /api/jobs/:id/attach./:aid",
    "POST /api/signalr/negotiate",
];

const ROUTE_COLUMNS: usize = 3;

/// Builds the RetailFixIt architecture graph.
///
/// `font` is the base font family; cluster titles use its `-Bold` variant.
///
/// # Errors
///
/// Returns a [`GraphError`] if the topology declares a node or cluster twice.
/// The built-in topology never does.
pub fn retailfixit(theme: &Theme, font: &str) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(Id::new(DIAGRAM_NAME));

    graph.set_attributes(GraphAttributes {
        rank_dir: Some(RankDir::LeftRight),
        background: Some(theme.background),
        font: Font::new()
            .with_name(font)
            .with_size(16.0)
            .with_color(theme.title),
        label: Some(TITLE.into()),
        label_loc: Some(LabelLoc::Top),
        pad: Some(0.8),
        node_sep: Some(0.35),
        rank_sep: Some(1.5),
        dpi: Some(150),
        splines: Some(Splines::Curved),
        compound: true,
    });
    graph.set_node_defaults(NodeDefaults {
        shape: Some(NodeShape::Box),
        style: BoxStyle::rounded_filled(),
        font: Font::new().with_name(font).with_size(10.0),
        margin: Some((0.2, 0.12)),
    });
    graph.set_edge_defaults(EdgeDefaults {
        font: Font::new()
            .with_name(font)
            .with_size(9.0)
            .with_color(theme.edge_label),
    });

    let bold_font = format!("{font}-Bold");

    add_mobile_cluster(&mut graph, theme, &bold_font)?;
    add_backend_cluster(&mut graph, theme, &bold_font)?;
    add_azure_cluster(&mut graph, theme, &bold_font)?;
    add_connections(&mut graph, theme);

    Ok(graph)
}

fn cluster(id: &str, title: &str, palette: &ClusterPalette, bold_font: &str) -> Cluster {
    Cluster::new(Id::new(id))
        .with_label(format!("  {title}  "))
        .with_style(ClusterStyle {
            style: BoxStyle::rounded_filled(),
            border: Some(palette.border),
            fill: Some(palette.fill),
            font: Font::new()
                .with_name(bold_font)
                .with_size(13.0)
                .with_color(palette.title),
        })
}

fn node_style(palette: &NodePalette) -> NodeStyle {
    NodeStyle {
        shape: Some(NodeShape::Box),
        fill: Some(palette.fill),
        border: Some(palette.border),
        font_color: None,
    }
}

fn heading(text: &str, color: Color, colspan: u32) -> Row {
    Row::new().with_cell(Cell::new(Span::new(text).bold().with_color(color)).with_colspan(colspan))
}

fn wide(span: Span, colspan: u32) -> Row {
    Row::new().with_cell(Cell::new(span).with_colspan(colspan))
}

/// Lays `texts` out row by row, `columns` cells per row.
fn grid(table: Table, texts: &[&str], columns: usize, color: Color) -> Table {
    texts
        .chunks(columns)
        .fold(table, |table, chunk| table.with_row(Row::from_texts(chunk.iter().copied(), color)))
}

fn add_mobile_cluster(graph: &mut Graph, theme: &Theme, bold_font: &str) -> Result<(), GraphError> {
    let mobile = Id::new("mobile");
    let palette = &theme.mobile_nodes;

    graph.add_cluster(cluster(
        "mobile",
        "MOBILE CLIENT  (React Native Expo SDK 54)",
        &theme.mobile,
        bold_font,
    ))?;

    let screens = grid(
        Table::new().with_row(heading("Screens", palette.heading, 3)),
        &["Login", "Job List", "Job Detail", "Create Job", "Activity", "Profile"],
        3,
        palette.text,
    );
    graph.add_node(
        Node::new(Id::new("screens"), screens)
            .in_cluster(mobile)
            .with_style(NodeStyle {
                font_color: Some(palette.text),
                ..node_style(palette)
            }),
    )?;

    let services = grid(
        Table::new().with_row(heading("Mobile Services", palette.heading, 2)),
        &["Sync Engine", "SignalR Client", "API Client", "Image Picker"],
        2,
        palette.text,
    );
    graph.add_node(
        Node::new(Id::new("services"), services)
            .in_cluster(mobile)
            .with_style(node_style(palette)),
    )?;

    let notes = Row::new()
        .with_cell(Cell::new(
            Span::new("jobs, pending_actions, sync_meta")
                .italic()
                .with_color(palette.note),
        ))
        .with_cell(Cell::new(Span::new("JWT tokens").italic().with_color(palette.note)));
    let local_storage = Table::new()
        .with_row(heading("Local Storage", palette.heading, 2))
        .with_row(Row::from_texts(["SQLite", "SecureStore"], palette.text))
        .with_row(notes);
    graph.add_node(
        Node::new(Id::new("local_storage"), local_storage)
            .in_cluster(mobile)
            .with_style(node_style(palette)),
    )?;

    Ok(())
}

fn add_backend_cluster(graph: &mut Graph, theme: &Theme, bold_font: &str) -> Result<(), GraphError> {
    let backend = Id::new("backend");
    let palette = &theme.backend_nodes;

    graph.add_cluster(cluster(
        "backend",
        "EXPRESS BACKEND  (Node.js 18+, TypeScript, Express 5)",
        &theme.backend,
        bold_font,
    ))?;

    let middleware = grid(
        Table::new().with_row(heading("Middleware Pipeline", palette.heading, 3)),
        &["Helmet", "CORS", "Gzip", "Pino Logger", "JWT Auth", "RBAC"],
        3,
        palette.text,
    );
    graph.add_node(
        Node::new(Id::new("middleware"), middleware)
            .in_cluster(backend)
            .with_style(node_style(palette)),
    )?;

    let title = format!("API Routes ({} endpoints)", API_ROUTES.len());
    let mut routes = Table::new()
        .with_cell_spacing(3)
        .with_row(heading(&title, palette.heading, ROUTE_COLUMNS as u32));
    for chunk in API_ROUTES.chunks(ROUTE_COLUMNS) {
        let row = chunk.iter().fold(Row::new(), |row, route| {
            row.with_cell(
                Cell::new(
                    Span::new(*route)
                        .with_color(palette.text)
                        .with_point_size(8.0),
                )
                .with_align(Align::Left),
            )
        });
        let row = (chunk.len()..ROUTE_COLUMNS).fold(row, |row, _| row.with_cell(Cell::empty()));
        routes = routes.with_row(row);
    }
    graph.add_node(
        Node::new(Id::new("routes"), routes)
            .in_cluster(backend)
            .with_style(node_style(palette)),
    )?;

    Ok(())
}

fn add_azure_cluster(graph: &mut Graph, theme: &Theme, bold_font: &str) -> Result<(), GraphError> {
    let azure = Id::new("azure");

    graph.add_cluster(cluster("azure", "AZURE CLOUD SERVICES", &theme.azure, bold_font))?;

    let palette = &theme.cosmos;
    let cosmos = Table::new()
        .with_row(heading("Azure Cosmos DB", palette.heading, 2))
        .with_row(wide(
            Span::new("Database: RetailFixItDB").with_color(palette.detail),
            2,
        ))
        .with_row(Row::from_texts(
            ["Jobs (/tenantId)", "Users (/tenantId)"],
            palette.text,
        ))
        .with_row(wide(
            Span::new("eTag concurrency | Patch ops | Cross-partition queries")
                .italic()
                .with_color(palette.note),
            2,
        ));
    graph.add_node(
        Node::new(Id::new("cosmos"), cosmos)
            .in_cluster(azure)
            .with_style(node_style(palette)),
    )?;

    let signalr = service_card(
        &theme.signalr,
        "Azure SignalR Service",
        "Hub: retailfixit (Serverless)",
        "Groups: vendor-*, user-*, admin",
        "JobCreated | JobAssigned | StatusChanged | JobDeleted",
    );
    graph.add_node(
        Node::new(Id::new("signalr"), signalr)
            .in_cluster(azure)
            .with_style(node_style(&theme.signalr)),
    )?;

    let blob = service_card(
        &theme.blob,
        "Azure Blob Storage",
        "Account: attachmentsjob",
        "Container: job-attachments",
        "SAS URLs (1-hour read-only expiry)",
    );
    graph.add_node(
        Node::new(Id::new("blob"), blob)
            .in_cluster(azure)
            .with_style(node_style(&theme.blob)),
    )?;

    Ok(())
}

/// Single-column card: heading, detail line, body line and italic footnote.
fn service_card(palette: &NodePalette, title: &str, detail: &str, body: &str, note: &str) -> Table {
    Table::new()
        .with_row(heading(title, palette.heading, 1))
        .with_row(wide(Span::new(detail).with_color(palette.detail), 1))
        .with_row(wide(Span::new(body).with_color(palette.text), 1))
        .with_row(wide(Span::new(note).italic().with_color(palette.note), 1))
}

fn flow(from: &str, to: &str, label: &str, palette: &FlowPalette, pen_width: f32) -> Edge {
    Edge::new(Id::new(from), Id::new(to))
        .with_label(label)
        .with_color(palette.line)
        .with_font_color(palette.label)
        .with_pen_width(pen_width)
}

fn add_connections(graph: &mut Graph, theme: &Theme) {
    let flows = &theme.flows;

    // Mobile internal
    graph.add_edge(flow("screens", "services", "user actions", &flows.mobile_internal, 1.5));
    graph.add_edge(
        flow(
            "services",
            "local_storage",
            "offline cache\n+ token storage",
            &flows.mobile_internal,
            1.5,
        )
        .with_direction(Direction::Both),
    );

    // Mobile to backend
    graph.add_edge(flow(
        "services",
        "middleware",
        "  HTTPS REST  \n  (JSON, bearer token, gzip)  ",
        &flows.https,
        3.0,
    ));
    graph.add_edge(flow("middleware", "routes", "request pipeline", &flows.pipeline, 1.5));

    // Real-time channel
    graph.add_edge(
        flow(
            "services",
            "signalr",
            "  WSS WebSocket  \n  (real-time push)  ",
            &flows.realtime,
            3.0,
        )
        .with_direction(Direction::Both),
    );

    // Backend to Azure
    graph.add_edge(flow(
        "routes",
        "cosmos",
        "  SDK  \n  (read/write jobs & users)  ",
        &flows.database,
        2.5,
    ));
    graph.add_edge(flow(
        "routes",
        "blob",
        "  SDK  \n  (upload/delete photos)  ",
        &flows.storage,
        2.5,
    ));
    graph.add_edge(
        flow(
            "routes",
            "signalr",
            "  REST API  \n  (broadcast events)  ",
            &flows.realtime,
            2.0,
        )
        .with_style(EdgeStyle::Dashed),
    );

    // Mobile reads photos straight from blob storage
    graph.add_edge(
        flow(
            "services",
            "blob",
            "  direct photo download  \n  (SAS URL)  ",
            &flows.storage,
            2.0,
        )
        .with_style(EdgeStyle::Dashed),
    );

    // Stack the Azure services vertically
    graph.add_edge(Edge::layout_hint(Id::new("cosmos"), Id::new("signalr")));
    graph.add_edge(Edge::layout_hint(Id::new("signalr"), Id::new("blob")));
}

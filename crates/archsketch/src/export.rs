pub mod dot;
pub mod render;

use std::io;

use thiserror::Error;

use archsketch_core::{error::GraphError, graph::Graph};

pub use render::{LayoutEngine, OutputFormat};

/// Turns a validated graph into the bytes of one output artifact.
pub trait Exporter {
    fn export(&self, graph: &Graph) -> Result<Vec<u8>, Error>;
}

/// Returns the exporter for `format`.
///
/// [`OutputFormat::Dot`] writes the DOT source without running Graphviz;
/// every other format is rendered by Graphviz with the `engine` layout.
pub fn exporter_for(format: OutputFormat, engine: LayoutEngine) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Dot => Box::new(dot::DotExporter),
        _ => Box::new(render::GraphvizExporter::new(format, engine)),
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Graphviz `dot` executable was not found on PATH")]
    EngineUnavailable,

    #[error("Graphviz `{engine}` failed: {message}")]
    Engine {
        engine: LayoutEngine,
        message: String,
    },

    #[error("Graphviz produced empty {0} output")]
    EmptyOutput(OutputFormat),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

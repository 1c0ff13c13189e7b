//! archsketch - renders the RetailFixIt architecture diagram with Graphviz.
//!
//! The diagram is described as an [`archsketch_core::graph::Graph`], exported
//! to DOT and laid out by the Graphviz `dot` executable, which must be on
//! `PATH` for every output format except DOT itself.

pub mod architecture;
pub mod config;
pub mod export;
pub mod theme;

mod error;

pub use archsketch_core::{color, graph, identifier, label, style};

pub use error::ArchsketchError;

use std::path::{Path, PathBuf};

use log::{debug, info};

use archsketch_core::graph::Graph;

use config::AppConfig;

/// Builder for assembling and rendering the architecture diagram.
///
/// # Examples
///
/// ```rust,no_run
/// use archsketch::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let graph = builder.build().expect("Failed to build");
/// let path = builder.default_output_path();
/// builder
///     .render_to_file(&graph, &path)
///     .expect("Failed to render");
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Assemble and validate the architecture graph with the configured theme
    /// and font.
    ///
    /// # Errors
    ///
    /// Returns `ArchsketchError::Config` for an invalid style configuration
    /// and `ArchsketchError::Graph` if the graph fails validation.
    pub fn build(&self) -> Result<Graph, ArchsketchError> {
        let style = self.config.style();
        info!(theme:% = style.theme_name(), font = style.font(); "Building diagram");

        let theme = style.theme().map_err(ArchsketchError::Config)?;
        let graph = architecture::retailfixit(&theme, style.font())?;
        graph.validate()?;

        debug!(
            clusters = graph.clusters().count(),
            nodes = graph.nodes().count(),
            edges = graph.edges().len();
            "Diagram built"
        );
        Ok(graph)
    }

    /// Export a graph as DOT source.
    ///
    /// # Errors
    ///
    /// Returns `ArchsketchError::Export` if the graph fails validation.
    pub fn to_dot(&self, graph: &Graph) -> Result<String, ArchsketchError> {
        Ok(export::dot::to_dot_string(graph)?)
    }

    /// Render a graph in the configured format.
    ///
    /// # Errors
    ///
    /// Returns `ArchsketchError::Export` if Graphviz is missing or fails.
    pub fn render(&self, graph: &Graph) -> Result<Vec<u8>, ArchsketchError> {
        let render = self.config.render();
        let exporter = export::exporter_for(render.format(), render.engine());
        Ok(exporter.export(graph)?)
    }

    /// Render a graph and write it to `path`, replacing any existing file.
    ///
    /// Nothing is written unless rendering succeeds.
    ///
    /// # Errors
    ///
    /// Returns `ArchsketchError::Export` if rendering or writing fails.
    pub fn render_to_file(&self, graph: &Graph, path: &Path) -> Result<(), ArchsketchError> {
        let bytes = self.render(graph)?;
        export::render::write_output(path, &bytes)?;

        info!(path = path.display().to_string(); "Diagram written");
        Ok(())
    }

    /// The default output file, `architecture_diagram.<ext>` in the working
    /// directory.
    pub fn default_output_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}.{}",
            architecture::OUTPUT_STEM,
            self.config.render().format().extension()
        ))
    }
}

//! archsketch CLI library
//!
//! This module contains the core CLI logic for the archsketch diagram
//! generator: resolving configuration, building the diagram and writing the
//! output file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::{Path, PathBuf};

use log::info;

use archsketch::{ArchsketchError, DiagramBuilder, config::AppConfig, export::OutputFormat};

/// Run the archsketch CLI application
///
/// Builds the architecture diagram, renders it and writes it to the output
/// path, which is returned on success.
///
/// # Errors
///
/// Returns `ArchsketchError` for:
/// - Configuration loading errors
/// - Graph validation errors
/// - Missing or failing Graphviz executable
/// - File I/O errors
pub fn run(args: &Args) -> Result<PathBuf, ArchsketchError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);

    let builder = DiagramBuilder::new(app_config);
    let output = args
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| builder.default_output_path());

    info!(
        output_path = output.display().to_string(),
        format:% = builder.config().render().format();
        "Generating diagram"
    );

    let graph = builder.build()?;
    builder.render_to_file(&graph, &output)?;

    Ok(output)
}

/// Applies command-line flags on top of the loaded configuration.
///
/// Without `--format`, a recognized extension on `--output` selects the
/// format; otherwise the configured format stands.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    let format = args.format.or_else(|| {
        args.output
            .as_deref()
            .and_then(format_from_extension)
    });

    if let Some(format) = format {
        config.render_mut().set_format(format);
    }
    if let Some(engine) = args.engine {
        config.render_mut().set_engine(engine);
    }
    if let Some(theme) = args.theme {
        config.style_mut().set_theme_name(theme);
    }
}

fn format_from_extension(path: &str) -> Option<OutputFormat> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}

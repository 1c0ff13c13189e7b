//! Command-line argument definitions for the archsketch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Running without arguments reproduces the default diagram;
//! flags override the configuration file.

use clap::Parser;

use archsketch::{
    export::{LayoutEngine, OutputFormat},
    theme::ThemeName,
};

/// Command-line arguments for the archsketch diagram generator
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output file [default: architecture_diagram.<format>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (png, svg, pdf, dot)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Color theme (dark, light)
    #[arg(short, long)]
    pub theme: Option<ThemeName>,

    /// Graphviz layout engine (dot, neato, fdp, circo, twopi)
    #[arg(short, long)]
    pub engine: Option<LayoutEngine>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

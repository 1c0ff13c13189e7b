//! Error types for archsketch operations.
//!
//! This module provides the main error type [`ArchsketchError`] which wraps
//! the error conditions of each stage: building the graph, exporting it and
//! writing the result.

use std::io;

use thiserror::Error;

use archsketch_core::error::GraphError;

use crate::export;

/// The main error type for archsketch operations.
#[derive(Debug, Error)]
pub enum ArchsketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ArchsketchError {
    /// Returns `true` when the failure is caused by Graphviz not being installed.
    pub fn is_engine_unavailable(&self) -> bool {
        matches!(self, Self::Export(export::Error::EngineUnavailable))
    }
}

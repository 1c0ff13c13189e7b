//! archsketch core types
//!
//! This crate provides the graph model behind archsketch diagrams:
//!
//! - **Identifiers**: string-interned identifiers ([`identifier::Id`])
//! - **Colors**: CSS color parsing with Graphviz-friendly output ([`color::Color`])
//! - **Labels**: plain text and HTML-like tables ([`label`] module)
//! - **Styles**: typed Graphviz attribute values ([`style`] module)
//! - **Graph**: clusters, nodes, edges and validation ([`graph`] module)

pub mod color;
pub mod error;
pub mod graph;
pub mod identifier;
pub mod label;
pub mod style;

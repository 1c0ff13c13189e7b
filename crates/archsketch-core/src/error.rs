//! Errors raised while assembling or validating a [`Graph`](crate::graph::Graph).

use thiserror::Error;

use crate::identifier::Id;

/// Which end of an edge a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node `{0}` is declared more than once")]
    DuplicateNode(Id),

    #[error("cluster `{0}` is declared more than once")]
    DuplicateCluster(Id),

    #[error("node `{node}` is placed in undeclared cluster `{cluster}`")]
    UnknownCluster { node: Id, cluster: Id },

    #[error("edge #{index} ({from} -> {to}): {endpoint} `{missing}` is not a declared node")]
    UnknownEdgeEndpoint {
        index: usize,
        from: Id,
        to: Id,
        endpoint: Endpoint,
        missing: Id,
    },
}

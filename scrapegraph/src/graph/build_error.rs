//! Graph assembly error.
//!
//! Returned by `BaseGraph::compile` when edges reference unregistered nodes
//! or no entry point was designated.

use thiserror::Error;

/// Error when compiling a graph.
///
/// Validation ensures every name appearing in the edge map (except the
/// START/END sentinels) is a registered node, and that exactly one edge
/// leaves START.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A node name in an edge was not registered via `add_node` (and is not
    /// START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge has START as its source, or more than one such edge.
    #[error("graph must have exactly one edge from START")]
    MissingEntryPoint,
}

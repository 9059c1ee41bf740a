//! Node execution error types.
//!
//! Used by `Node::execute` and everything a node calls on its behalf (LLM
//! clients, web search, document loaders). The engine never wraps or retries
//! these; they propagate unchanged out of `CompiledGraph::execute`.

use thiserror::Error;

/// Error raised while executing a node or validating its configuration.
///
/// The variants follow the failure taxonomy of the system: configuration
/// problems are never retried, empty results are fatal for the run, and
/// timeouts are distinguished so callers may choose to retry.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Unsupported provider/engine or malformed proxy descriptor. Raised at
    /// construction/call time, surfaced verbatim to the caller.
    #[error("{0}")]
    InvalidConfiguration(String),

    /// A search or lookup produced zero results.
    #[error("{0}")]
    EmptyResult(String),

    /// An external request exceeded its configured bound (seconds).
    #[error("Search request timed out after {0} seconds")]
    Timeout(u64),

    /// Any other node-internal failure (LLM call, fetch, parse).
    #[error("execution failed: {0}")]
    Execution(String),
}

impl NodeError {
    /// Whether a bounded retry wrapper may re-attempt the operation.
    ///
    /// Configuration errors and empty results are terminal; timeouts and
    /// transient execution failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, NodeError::Timeout(_) | NodeError::Execution(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Timeout renders the exact user-visible message.
    #[test]
    fn timeout_display_matches_contract() {
        let err = NodeError::Timeout(5);
        assert_eq!(err.to_string(), "Search request timed out after 5 seconds");
    }

    /// **Scenario**: EmptyResult displays its message verbatim, no prefix.
    #[test]
    fn empty_result_display_is_verbatim() {
        let err = NodeError::EmptyResult("Zero results found for the search query.".to_string());
        assert_eq!(err.to_string(), "Zero results found for the search query.");
    }

    /// **Scenario**: only timeouts and execution failures are retryable.
    #[test]
    fn retryable_classification() {
        assert!(NodeError::Timeout(1).is_retryable());
        assert!(NodeError::Execution("transient".into()).is_retryable());
        assert!(!NodeError::InvalidConfiguration("bad".into()).is_retryable());
        assert!(!NodeError::EmptyResult("none".into()).is_retryable());
    }
}

//! The node contract shared by all graph nodes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::NodeError;
use crate::llm::TokenUsage;
use crate::state::State;
use crate::utils::parse_state_keys::parse_expression;

/// A unit of graph work.
///
/// `input` is a dependency expression over state keys (`"a AND (b OR c)"`);
/// only the identifiers matter — they name what the node reads. `output`
/// lists the keys the node produces. `execute` receives the running state
/// and returns it extended with freshly computed output values; the engine
/// folds the result forward by key-overwrite.
///
/// Nodes may perform network I/O and are the unit of retry and error
/// containment: a failure is a typed [`NodeError`] that halts the run.
#[async_trait]
pub trait Node: Send + Sync {
    /// Unique name within a graph; keys the edge map.
    fn node_name(&self) -> &str;

    /// Dependency expression naming the state keys this node reads.
    fn input(&self) -> &str;

    /// State keys this node produces.
    fn output(&self) -> &[String];

    /// Runs the node over the current state.
    async fn execute(&self, state: State) -> Result<State, NodeError>;

    /// Token usage for the most recent `execute`, when the node reports it.
    /// The engine copies this into the execution trace.
    fn usage(&self) -> Option<TokenUsage> {
        None
    }

    /// The parsed dependency key set of `input`.
    fn input_keys(&self) -> Vec<String> {
        parse_expression(self.input())
    }
}

/// Looks up a required state key.
pub(crate) fn required_value<'a>(state: &'a State, key: &str) -> Result<&'a Value, NodeError> {
    state
        .get(key)
        .ok_or_else(|| NodeError::Execution(format!("state key '{key}' is missing")))
}

/// Looks up a required state key that must hold a string.
pub(crate) fn required_str<'a>(state: &'a State, key: &str) -> Result<&'a str, NodeError> {
    required_value(state, key)?.as_str().ok_or_else(|| {
        NodeError::Execution(format!("state key '{key}' is not a string"))
    })
}

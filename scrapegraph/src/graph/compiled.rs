//! Compiled graph: immutable, supports execute only.
//!
//! Built by `BaseGraph::compile`. Holds the node map, the edge map and the
//! entry point; `execute` threads one state through the nodes strictly
//! sequentially and returns the final state plus the execution trace.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::error::NodeError;
use crate::graph::base_graph::{Edge, END};
use crate::graph::execution_info::{ExecutionInfo, NodeExecution};
use crate::nodes::Node;
use crate::state::State;

/// Executable graph produced by `BaseGraph::compile()`.
///
/// Execution starts at the entry point; after each node the edge map picks
/// the successor (a fixed name, or a decision function over the just-updated
/// state). A node with no outgoing edge, or an edge to `END`, terminates the
/// run. Node errors propagate unmodified; the engine never retries.
pub struct CompiledGraph {
    pub(super) nodes: HashMap<String, Arc<dyn Node>>,
    /// Registration order; drives `nodes()` and the tracking bridge.
    pub(super) node_order: Vec<String>,
    pub(super) edges: HashMap<String, Edge>,
    pub(super) entry_point: String,
    pub(super) max_steps: usize,
}

impl CompiledGraph {
    /// Runs the graph over `initial_state`.
    ///
    /// Returns the final state and a fresh per-run trace with one entry per
    /// executed node, in order. Exceeding the step bound (a cyclic edge map)
    /// is an execution error.
    pub async fn execute(
        &self,
        initial_state: State,
    ) -> Result<(State, ExecutionInfo), NodeError> {
        let run_started = Instant::now();
        let mut state = initial_state;
        let mut info = ExecutionInfo::default();
        let mut current = self.entry_point.clone();
        let mut steps = 0usize;

        tracing::info!(entry_point = %current, "starting graph execution");

        loop {
            if steps >= self.max_steps {
                return Err(NodeError::Execution(format!(
                    "maximum step count ({}) exceeded, the edge map may contain a cycle",
                    self.max_steps
                )));
            }
            steps += 1;

            let node = self.nodes.get(&current).ok_or_else(|| {
                NodeError::Execution(format!("edge resolved to unknown node '{current}'"))
            })?;

            tracing::debug!(node = %current, "executing node");
            let node_started = Instant::now();
            state = match node.execute(state).await {
                Ok(updated) => updated,
                Err(err) => {
                    tracing::error!(node = %current, error = %err, "node failed");
                    return Err(err);
                }
            };
            info.records.push(NodeExecution {
                node_name: current.clone(),
                elapsed: node_started.elapsed(),
                usage: node.usage(),
            });
            tracing::debug!(node = %current, "node complete");

            let next = match self.edges.get(&current) {
                None => break,
                Some(Edge::Direct(to)) => to.clone(),
                Some(Edge::Conditional(decide)) => decide(&state),
            };
            if next == END {
                break;
            }
            current = next;
        }

        info.total_elapsed = run_started.elapsed();
        tracing::info!(
            steps = info.records.len(),
            elapsed_ms = info.total_elapsed.as_millis() as u64,
            "graph execution complete"
        );
        Ok((state, info))
    }

    /// The node name execution starts at.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Nodes in registration order.
    pub fn nodes(&self) -> Vec<Arc<dyn Node>> {
        self.node_order
            .iter()
            .filter_map(|name| self.nodes.get(name).cloned())
            .collect()
    }

    /// Unconditional edges as `(from, to)` pairs, `END` targets included.
    pub fn direct_edges(&self) -> Vec<(String, String)> {
        self.edges
            .iter()
            .filter_map(|(from, edge)| match edge {
                Edge::Direct(to) => Some((from.clone(), to.clone())),
                Edge::Conditional(_) => None,
            })
            .collect()
    }

    /// Whether any edge is a decision function.
    pub fn has_conditional_edges(&self) -> bool {
        self.edges
            .values()
            .any(|edge| matches!(edge, Edge::Conditional(_)))
    }

    /// Names of terminal nodes: no outgoing edge, or a direct edge to `END`.
    pub fn terminal_nodes(&self) -> Vec<String> {
        self.node_order
            .iter()
            .filter(|name| match self.edges.get(name.as_str()) {
                None => true,
                Some(Edge::Direct(to)) => to == END,
                Some(Edge::Conditional(_)) => false,
            })
            .cloned()
            .collect()
    }
}

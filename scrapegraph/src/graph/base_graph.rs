//! Graph builder: nodes plus an edge map, validated into a `CompiledGraph`.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using
//! `START` and `END` for graph entry/exit, branch with
//! `add_conditional_edge`, then `compile()` to get an executable graph.

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::build_error::BuildError;
use crate::graph::compiled::CompiledGraph;
use crate::nodes::Node;
use crate::state::State;

/// Sentinel for graph entry: use as `from` in `add_edge(START, first_node)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to` in `add_edge(last_node, END)`.
pub const END: &str = "__end__";

/// Decision function for a conditional edge: reads the just-updated state and
/// names the successor node (or `END`).
pub type ConditionFn = Arc<dyn Fn(&State) -> String + Send + Sync>;

/// One outgoing edge: a fixed successor, or a decision function evaluated
/// against the state after the source node ran.
#[derive(Clone)]
pub enum Edge {
    Direct(String),
    Conditional(ConditionFn),
}

impl std::fmt::Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::Direct(to) => f.debug_tuple("Direct").field(to).finish(),
            Edge::Conditional(_) => f.write_str("Conditional(<fn>)"),
        }
    }
}

/// Graph under construction: an ordered node collection plus the edge map.
///
/// Node names key the edge map; registering a node with an existing name
/// replaces it. Each node has at most one outgoing edge (direct or
/// conditional); branching happens inside a decision function, not by
/// fanning out edges.
pub struct BaseGraph {
    nodes: Vec<Arc<dyn Node>>,
    edges: HashMap<String, Edge>,
    start_edges: Vec<String>,
    max_steps: usize,
}

impl Default for BaseGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseGraph {
    /// Default bound on steps per run; guards against cyclic edge maps.
    pub const DEFAULT_MAX_STEPS: usize = 100;

    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: HashMap::new(),
            start_edges: Vec::new(),
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Overrides the per-run step bound (builder style).
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Adds a node, keyed by its `node_name()`. Replaces a node already
    /// registered under the same name.
    pub fn add_node(&mut self, node: Arc<dyn Node>) -> &mut Self {
        match self
            .nodes
            .iter()
            .position(|n| n.node_name() == node.node_name())
        {
            Some(pos) => self.nodes[pos] = node,
            None => self.nodes.push(node),
        }
        self
    }

    /// Adds an unconditional edge from `from` to `to`.
    ///
    /// Use `START` for graph entry and `END` for graph exit. All names
    /// except the sentinels must be registered via `add_node` before
    /// `compile()`.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        let from = from.into();
        let to = to.into();
        if from == START {
            self.start_edges.push(to);
        } else {
            self.edges.insert(from, Edge::Direct(to));
        }
        self
    }

    /// Adds a conditional edge: after `from` runs, `decide` picks the
    /// successor from the just-updated state. The returned name must be a
    /// registered node or `END`; an unknown name fails the run.
    pub fn add_conditional_edge<F>(&mut self, from: impl Into<String>, decide: F) -> &mut Self
    where
        F: Fn(&State) -> String + Send + Sync + 'static,
    {
        self.edges.insert(from.into(), Edge::Conditional(Arc::new(decide)));
        self
    }

    /// Validates the graph and produces an executable `CompiledGraph`.
    ///
    /// Checks that exactly one edge leaves START, that its target is a
    /// registered node, and that every direct-edge endpoint resolves to a
    /// registered node or `END`. Conditional edges are validated at run time
    /// when the decision function produces a name.
    pub fn compile(self) -> Result<CompiledGraph, BuildError> {
        let mut node_map: HashMap<String, Arc<dyn Node>> = HashMap::new();
        let mut node_order: Vec<String> = Vec::new();
        for node in self.nodes {
            let name = node.node_name().to_string();
            if node_map.insert(name.clone(), node).is_none() {
                node_order.push(name);
            }
        }

        if self.start_edges.len() != 1 {
            return Err(BuildError::MissingEntryPoint);
        }
        let entry_point = self.start_edges.into_iter().next().ok_or(BuildError::MissingEntryPoint)?;
        if !node_map.contains_key(&entry_point) {
            return Err(BuildError::NodeNotFound(entry_point));
        }

        for (from, edge) in &self.edges {
            if !node_map.contains_key(from) {
                return Err(BuildError::NodeNotFound(from.clone()));
            }
            if let Edge::Direct(to) = edge {
                if to != END && !node_map.contains_key(to) {
                    return Err(BuildError::NodeNotFound(to.clone()));
                }
            }
        }

        Ok(CompiledGraph {
            nodes: node_map,
            node_order,
            edges: self.edges,
            entry_point,
            max_steps: self.max_steps,
        })
    }
}

//! Bridge from the graph's node/edge model to an external workflow-tracking
//! runtime's action/transition model.
//!
//! The runtime itself is an external collaborator behind [`TrackingRuntime`];
//! the bridge translates nodes into actions (reads = parsed dependency keys,
//! writes = declared outputs) and direct edges into default-trigger
//! transitions. Conditional edges are not representable here and are
//! rejected at construction rather than silently flattened.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::error::NodeError;
use crate::graph::{CompiledGraph, END};
use crate::nodes::Node;
use crate::state::{merge, State};

/// Bridge construction error.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The tracking runtime is not reachable; telemetry is opt-in, so the
    /// caller must learn it was not attached.
    #[error("tracking runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// The graph routes through decision functions, which have no
    /// unconditional-transition representation.
    #[error("graphs with conditional edges cannot be bridged")]
    ConditionalEdgesNotBridgeable,

    /// The runtime rejected the assembled application.
    #[error("tracking application build failed: {0}")]
    Build(String),
}

/// Transition trigger. Only the unconditional default is representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Trigger {
    #[default]
    Default,
}

/// Transition tuple: `(source, dest, trigger)`.
pub type Transition = (String, String, Trigger);

/// Adapter action wrapping one graph node.
///
/// `reads` come from the node's parsed dependency expression, `writes` from
/// its declared outputs. `run` feeds the node a state view filtered to its
/// reads; `update` folds the result back by key-overwrite.
#[derive(Clone)]
pub struct NodeAction {
    node: Arc<dyn Node>,
}

impl NodeAction {
    pub fn new(node: Arc<dyn Node>) -> Self {
        Self { node }
    }

    pub fn name(&self) -> &str {
        self.node.node_name()
    }

    /// State keys this action reads.
    pub fn reads(&self) -> Vec<String> {
        self.node.input_keys()
    }

    /// State keys this action writes.
    pub fn writes(&self) -> &[String] {
        self.node.output()
    }

    /// Executes the node over a view of `state` restricted to its reads.
    pub async fn run(&self, state: &State) -> Result<State, NodeError> {
        let mut view = State::new();
        for key in self.reads() {
            if let Some(value) = state.get(&key) {
                view.insert(key, value.clone());
            }
        }
        tracing::debug!(action = %self.name(), "starting action");
        let result = self.node.execute(view).await;
        tracing::debug!(action = %self.name(), ok = result.is_ok(), "finishing action");
        result
    }

    /// Folds an action result into the runtime state.
    pub fn update(&self, result: State, state: &mut State) {
        merge(state, result);
    }
}

/// Identifier/tracking configuration for the external runtime.
#[derive(Clone, Debug, Default)]
pub struct TrackerConfig {
    pub project_name: String,
    /// Fresh identifier when `None`; otherwise inherited from a parent run.
    pub app_instance_id: Option<String>,
    /// Extra inputs handed to the application at run time.
    pub inputs: State,
}

/// External workflow-tracking runtime: consumes actions, transitions, an
/// entry point and identifiers, and produces a runnable application.
pub trait TrackingRuntime: Send + Sync {
    /// Fails fast when the runtime cannot be reached.
    fn ensure_available(&self) -> Result<(), BridgeError> {
        Ok(())
    }

    /// Assembles an application instance wired with the bridge's actions and
    /// transitions.
    fn build(
        &self,
        actions: Vec<NodeAction>,
        transitions: Vec<Transition>,
        entry_point: &str,
        initial_state: State,
        config: &TrackerConfig,
    ) -> Result<Box<dyn TrackedApp>, BridgeError>;
}

/// A built tracking application; runs to completion and exposes its final
/// state object.
#[async_trait]
pub trait TrackedApp: Send {
    /// Runs until one of `halt_after` completes; returns the runtime's final
    /// state object.
    async fn run(&mut self, halt_after: &[String]) -> Result<Value, NodeError>;
}

/// Adapts a [`CompiledGraph`] to a [`TrackingRuntime`].
pub struct TrackerBridge {
    runtime: Arc<dyn TrackingRuntime>,
    config: TrackerConfig,
    actions: Vec<NodeAction>,
    transitions: Vec<Transition>,
    entry_point: String,
    terminals: Vec<String>,
}

impl TrackerBridge {
    /// Builds the bridge over a compiled graph.
    ///
    /// Fails when the runtime is unavailable or the graph contains
    /// conditional edges.
    pub fn new(
        graph: &CompiledGraph,
        runtime: Arc<dyn TrackingRuntime>,
        config: TrackerConfig,
    ) -> Result<Self, BridgeError> {
        runtime.ensure_available()?;
        if graph.has_conditional_edges() {
            return Err(BridgeError::ConditionalEdgesNotBridgeable);
        }

        let actions = graph.nodes().into_iter().map(NodeAction::new).collect();
        let transitions = graph
            .direct_edges()
            .into_iter()
            .filter(|(_, to)| to != END)
            .map(|(from, to)| (from, to, Trigger::Default))
            .collect();

        Ok(Self {
            runtime,
            config,
            actions,
            transitions,
            entry_point: graph.entry_point().to_string(),
            terminals: graph.terminal_nodes(),
        })
    }

    pub fn actions(&self) -> &[NodeAction] {
        &self.actions
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Runs the graph through the tracking runtime and converts the final
    /// state object back to a plain mapping.
    pub async fn execute(&self, initial_state: State) -> Result<State, NodeError> {
        let mut app = self
            .runtime
            .build(
                self.actions.clone(),
                self.transitions.clone(),
                &self.entry_point,
                initial_state,
                &self.config,
            )
            .map_err(|e| NodeError::Execution(e.to_string()))?;
        let final_state = app.run(&self.terminals).await?;
        match final_state {
            Value::Object(map) => Ok(map),
            other => Err(NodeError::Execution(format!(
                "tracking runtime returned a non-object final state: {other}"
            ))),
        }
    }
}

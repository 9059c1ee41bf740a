//! Integration tests for the graph engine: execution order, telemetry,
//! conditional routing, error propagation, cycle guard.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use scrapegraph::{BaseGraph, Node, NodeError, State, END, START};

/// Appends its name to the "trail" list and writes its own marker key.
struct TrailNode {
    name: &'static str,
    output: Vec<String>,
}

impl TrailNode {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            output: vec![format!("{name}_done")],
        }
    }
}

#[async_trait]
impl Node for TrailNode {
    fn node_name(&self) -> &str {
        self.name
    }
    fn input(&self) -> &str {
        "trail"
    }
    fn output(&self) -> &[String] {
        &self.output
    }
    async fn execute(&self, mut state: State) -> Result<State, NodeError> {
        let mut trail = state
            .get("trail")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        trail.push(json!(self.name));
        state.insert("trail".to_string(), Value::Array(trail));
        state.insert(self.output[0].clone(), json!(true));
        Ok(state)
    }
}

/// Fails with a fixed execution error.
struct FailingNode;

#[async_trait]
impl Node for FailingNode {
    fn node_name(&self) -> &str {
        "failing"
    }
    fn input(&self) -> &str {
        ""
    }
    fn output(&self) -> &[String] {
        &[]
    }
    async fn execute(&self, _state: State) -> Result<State, NodeError> {
        Err(NodeError::Execution("boom".to_string()))
    }
}

fn line_graph(names: &[&'static str]) -> scrapegraph::CompiledGraph {
    let mut graph = BaseGraph::new();
    for name in names {
        graph.add_node(Arc::new(TrailNode::new(name)));
    }
    graph.add_edge(START, names[0]);
    for pair in names.windows(2) {
        graph.add_edge(pair[0], pair[1]);
    }
    graph.add_edge(names[names.len() - 1], END);
    graph.compile().expect("graph compiles")
}

/// **Scenario**: N nodes in a line each run exactly once, in order, and the
/// trace has exactly N entries in that order.
#[tokio::test]
async fn line_graph_runs_in_order_with_full_trace() {
    let names = ["first", "second", "third", "fourth"];
    let graph = line_graph(&names);
    let (state, info) = graph.execute(State::new()).await.expect("run succeeds");

    let trail: Vec<String> = state
        .get("trail")
        .and_then(Value::as_array)
        .expect("trail recorded")
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    assert_eq!(trail, names);
    assert_eq!(info.records.len(), names.len());
    assert_eq!(info.node_names(), names);
}

/// **Scenario**: upstream state keys survive the whole run; each node's
/// marker key is present in the final state.
#[tokio::test]
async fn state_accumulates_keys() {
    let graph = line_graph(&["a", "b"]);
    let initial = scrapegraph::state::seeded("user_prompt", json!("hello"));
    let (state, _) = graph.execute(initial).await.expect("run succeeds");
    assert_eq!(state.get("user_prompt"), Some(&json!("hello")));
    assert_eq!(state.get("a_done"), Some(&json!(true)));
    assert_eq!(state.get("b_done"), Some(&json!(true)));
}

/// **Scenario**: a conditional edge routes on the just-updated state; the
/// skipped branch never runs.
#[tokio::test]
async fn conditional_edge_routes_on_updated_state() {
    let mut graph = BaseGraph::new();
    graph.add_node(Arc::new(TrailNode::new("probe")));
    graph.add_node(Arc::new(TrailNode::new("left")));
    graph.add_node(Arc::new(TrailNode::new("right")));
    graph.add_edge(START, "probe");
    graph.add_conditional_edge("probe", |state: &State| {
        // probe_done is written by "probe" itself, proving the decision sees
        // the post-execution state.
        if state.contains_key("probe_done") {
            "right".to_string()
        } else {
            "left".to_string()
        }
    });
    graph.add_edge("left", END);
    graph.add_edge("right", END);
    let compiled = graph.compile().expect("graph compiles");

    let (state, info) = compiled.execute(State::new()).await.expect("run succeeds");
    assert_eq!(info.node_names(), vec!["probe", "right"]);
    assert!(state.get("left_done").is_none());
}

/// **Scenario**: a decision function may end the run by returning END.
#[tokio::test]
async fn conditional_edge_may_return_end() {
    let mut graph = BaseGraph::new();
    graph.add_node(Arc::new(TrailNode::new("only")));
    graph.add_edge(START, "only");
    graph.add_conditional_edge("only", |_: &State| END.to_string());
    let compiled = graph.compile().expect("graph compiles");
    let (_, info) = compiled.execute(State::new()).await.expect("run succeeds");
    assert_eq!(info.node_names(), vec!["only"]);
}

/// **Scenario**: a node error propagates out of execute unmodified.
#[tokio::test]
async fn node_error_propagates_unchanged() {
    let mut graph = BaseGraph::new();
    graph.add_node(Arc::new(TrailNode::new("ok")));
    graph.add_node(Arc::new(FailingNode));
    graph.add_edge(START, "ok");
    graph.add_edge("ok", "failing");
    graph.add_edge("failing", END);
    let compiled = graph.compile().expect("graph compiles");

    let err = compiled.execute(State::new()).await.unwrap_err();
    match err {
        NodeError::Execution(msg) => assert_eq!(msg, "boom"),
        other => panic!("expected Execution(boom), got {other:?}"),
    }
}

/// **Scenario**: a cyclic edge map errors once the step bound is exceeded.
#[tokio::test]
async fn cycle_exceeds_max_steps() {
    let mut graph = BaseGraph::new().with_max_steps(5);
    graph.add_node(Arc::new(TrailNode::new("a")));
    graph.add_node(Arc::new(TrailNode::new("b")));
    graph.add_edge(START, "a");
    graph.add_edge("a", "b");
    graph.add_edge("b", "a");
    let compiled = graph.compile().expect("graph compiles");

    let err = compiled.execute(State::new()).await.unwrap_err();
    match err {
        NodeError::Execution(msg) => {
            assert!(msg.contains("maximum step count"), "{msg}");
        }
        other => panic!("expected Execution, got {other:?}"),
    }
}

/// **Scenario**: a decision function naming an unknown node fails the run.
#[tokio::test]
async fn unknown_conditional_target_fails() {
    let mut graph = BaseGraph::new();
    graph.add_node(Arc::new(TrailNode::new("a")));
    graph.add_conditional_edge("a", |_: &State| "ghost".to_string());
    graph.add_edge(START, "a");
    let compiled = graph.compile().expect("graph compiles");

    let err = compiled.execute(State::new()).await.unwrap_err();
    match err {
        NodeError::Execution(msg) => assert!(msg.contains("ghost"), "{msg}"),
        other => panic!("expected Execution, got {other:?}"),
    }
}

/// **Scenario**: traces do not leak across runs; each execute produces a
/// fresh trace.
#[tokio::test]
async fn trace_is_fresh_per_run() {
    let graph = line_graph(&["a", "b"]);
    let (_, first) = graph.execute(State::new()).await.expect("first run");
    let (_, second) = graph.execute(State::new()).await.expect("second run");
    assert_eq!(first.records.len(), 2);
    assert_eq!(second.records.len(), 2);
}

/// **Scenario**: a node with no outgoing edge terminates the run.
#[tokio::test]
async fn missing_edge_is_terminal() {
    let mut graph = BaseGraph::new();
    graph.add_node(Arc::new(TrailNode::new("last")));
    graph.add_edge(START, "last");
    let compiled = graph.compile().expect("graph compiles");
    let (_, info) = compiled.execute(State::new()).await.expect("run succeeds");
    assert_eq!(info.node_names(), vec!["last"]);
}

//! Conditional routing: a decision function picks the successor from the
//! just-updated state.
//!
//! ```text
//! cargo run -p scrapegraph-examples --example conditional_route
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use scrapegraph::{BaseGraph, Node, NodeError, State, END, START};
use serde_json::{json, Value};

/// Counts the URLs in the state.
struct CountNode;

#[async_trait]
impl Node for CountNode {
    fn node_name(&self) -> &str {
        "count"
    }
    fn input(&self) -> &str {
        "urls"
    }
    fn output(&self) -> &[String] {
        &[]
    }
    async fn execute(&self, mut state: State) -> Result<State, NodeError> {
        let count = state
            .get("urls")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        state.insert("count".to_string(), json!(count));
        Ok(state)
    }
}

/// Writes a verdict key with a fixed label.
struct LabelNode {
    name: &'static str,
    label: &'static str,
}

#[async_trait]
impl Node for LabelNode {
    fn node_name(&self) -> &str {
        self.name
    }
    fn input(&self) -> &str {
        "count"
    }
    fn output(&self) -> &[String] {
        &[]
    }
    async fn execute(&self, mut state: State) -> Result<State, NodeError> {
        state.insert("verdict".to_string(), json!(self.label));
        Ok(state)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut graph = BaseGraph::new();
    graph.add_node(Arc::new(CountNode));
    graph.add_node(Arc::new(LabelNode {
        name: "plenty",
        label: "plenty of sources",
    }));
    graph.add_node(Arc::new(LabelNode {
        name: "scarce",
        label: "few sources",
    }));
    graph.add_edge(START, "count");
    graph.add_conditional_edge("count", |state: &State| {
        let count = state.get("count").and_then(Value::as_u64).unwrap_or(0);
        if count >= 3 {
            "plenty".to_string()
        } else {
            "scarce".to_string()
        }
    });
    graph.add_edge("plenty", END);
    graph.add_edge("scarce", END);
    let compiled = graph.compile()?;

    let initial = scrapegraph::state::seeded(
        "urls",
        json!(["https://a.example", "https://b.example"]),
    );
    let (final_state, info) = compiled.execute(initial).await?;

    println!("verdict: {}", final_state["verdict"]);
    println!("path: {:?}", info.node_names());

    Ok(())
}

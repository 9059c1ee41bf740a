//! Bridge a compiled graph to a (stub) tracking runtime and run through it.
//!
//! The stub stands in for a real workflow tracker; it walks the bridged
//! actions and transitions the same way an external runtime would.
//!
//! ```text
//! cargo run -p scrapegraph-examples --example tracker_bridge
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use scrapegraph::integrations::{
    BridgeError, NodeAction, TrackedApp, TrackerBridge, TrackerConfig, TrackingRuntime, Transition,
};
use scrapegraph::{BaseGraph, GenerateAnswerNode, MockLlm, MockWebSearch, SearchInternetNode, State, END, START};
use serde_json::{json, Value};

struct StubRuntime;

struct StubApp {
    actions: Vec<NodeAction>,
    transitions: Vec<Transition>,
    current: String,
    state: State,
}

impl TrackingRuntime for StubRuntime {
    fn build(
        &self,
        actions: Vec<NodeAction>,
        transitions: Vec<Transition>,
        entry_point: &str,
        initial_state: State,
        config: &TrackerConfig,
    ) -> Result<Box<dyn TrackedApp>, BridgeError> {
        println!(
            "tracking project {:?}, {} actions, {} transitions",
            config.project_name,
            actions.len(),
            transitions.len()
        );
        Ok(Box::new(StubApp {
            actions,
            transitions,
            current: entry_point.to_string(),
            state: initial_state,
        }))
    }
}

#[async_trait]
impl TrackedApp for StubApp {
    async fn run(&mut self, halt_after: &[String]) -> Result<Value, scrapegraph::NodeError> {
        loop {
            let action = self
                .actions
                .iter()
                .find(|a| a.name() == self.current)
                .expect("bridged action exists");
            println!("running action {}", action.name());
            let result = action.run(&self.state).await?;
            action.update(result, &mut self.state);

            if halt_after.contains(&self.current) {
                return Ok(Value::Object(self.state.clone()));
            }
            match self
                .transitions
                .iter()
                .find(|(from, _, _)| *from == self.current)
            {
                Some((_, to, _)) => self.current = to.clone(),
                None => return Ok(Value::Object(self.state.clone())),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let llm = Arc::new(MockLlm::new("Paris."));
    let search = Arc::new(MockWebSearch::new(vec![
        "https://en.wikipedia.org/wiki/Paris".to_string(),
    ]));

    let mut graph = BaseGraph::new();
    graph.add_node(Arc::new(SearchInternetNode::new(
        "user_prompt",
        vec!["urls".to_string()],
        llm.clone(),
        search,
    )));
    graph.add_node(Arc::new(GenerateAnswerNode::new(
        "user_prompt AND urls",
        vec!["answer".to_string()],
        llm,
    )));
    graph.add_edge(START, "search_internet");
    graph.add_edge("search_internet", "generate_answer");
    graph.add_edge("generate_answer", END);
    let compiled = graph.compile()?;

    let bridge = TrackerBridge::new(
        &compiled,
        Arc::new(StubRuntime),
        TrackerConfig {
            project_name: "demo".to_string(),
            app_instance_id: None,
            inputs: State::new(),
        },
    )?;

    let initial = scrapegraph::state::seeded("user_prompt", json!("What is the capital of France?"));
    let final_state = bridge.execute(initial).await?;
    println!("answer: {}", final_state["answer"]);

    Ok(())
}

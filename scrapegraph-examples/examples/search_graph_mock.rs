//! Run a search → answer pipeline entirely on mocks: no network, no keys.
//!
//! ```text
//! cargo run -p scrapegraph-examples --example search_graph_mock
//! ```

use std::sync::Arc;

use scrapegraph::{
    BaseGraph, GenerateAnswerNode, MockLlm, MockWebSearch, SearchInternetNode, TokenUsage, END,
    START,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let llm = Arc::new(
        MockLlm::new("Paris is the capital of France.").with_usage(TokenUsage {
            prompt_tokens: 20,
            completion_tokens: 8,
        }),
    );
    let search = Arc::new(MockWebSearch::new(vec![
        "https://en.wikipedia.org/wiki/Paris".to_string(),
        "https://en.wikipedia.org/wiki/France".to_string(),
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

    let initial = scrapegraph::state::seeded("user_prompt", json!("What is the capital of France?"));
    let (final_state, info) = compiled.execute(initial).await?;

    println!("answer: {}", final_state["answer"]);
    for record in &info.records {
        println!("{:<20} {:?}", record.node_name, record.elapsed);
    }
    println!("total tokens: {}", info.total_usage().total());

    Ok(())
}

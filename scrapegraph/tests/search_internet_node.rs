//! Integration tests for SearchInternetNode: query generation, state merge,
//! zero-results handling, retry of transient search failures.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use scrapegraph::utils::retry::RetryPolicy;
use scrapegraph::utils::SearchEngine;
use scrapegraph::{MockLlm, MockWebSearch, Node, NodeError, SearchInternetNode, State, WebSearch};

fn node_with(llm: MockLlm, search: Arc<dyn WebSearch>) -> SearchInternetNode {
    SearchInternetNode::new(
        "user_input",
        vec!["search_results".to_string()],
        Arc::new(llm),
        search,
    )
    .with_max_results(3)
}

/// **Scenario**: with results available, the node writes them to its output
/// key and leaves prior state intact.
#[tokio::test]
async fn execute_writes_results_and_keeps_state() {
    let results = vec![
        "https://en.wikipedia.org/wiki/Paris".to_string(),
        "https://en.wikipedia.org/wiki/France".to_string(),
        "https://en.wikipedia.org/wiki/%C3%8Ele-de-France".to_string(),
    ];
    let node = node_with(
        MockLlm::new("mock search query"),
        Arc::new(MockWebSearch::new(results.clone())),
    );

    let state = scrapegraph::state::seeded("user_input", json!("What is the capital of France?"));
    let updated = node.execute(state).await.expect("search succeeds");

    assert_eq!(
        updated.get("user_input"),
        Some(&json!("What is the capital of France?"))
    );
    assert_eq!(updated.get("search_results"), Some(&json!(results)));
    assert_eq!(updated.len(), 2);
}

/// **Scenario**: zero results fail with the exact user-visible message.
#[tokio::test]
async fn execute_zero_results_fails() {
    let node = node_with(
        MockLlm::new("mock search query"),
        Arc::new(MockWebSearch::empty()),
    );

    let state = scrapegraph::state::seeded(
        "user_input",
        json!("Non-existent topic that yields no search results"),
    );
    let err = node.execute(state).await.unwrap_err();
    assert_eq!(err.to_string(), "Zero results found for the search query.");
    assert!(matches!(err, NodeError::EmptyResult(_)));
}

/// **Scenario**: the first comma-separated candidate becomes the query sent
/// to the search capability.
#[tokio::test]
async fn first_candidate_becomes_query() {
    let search = Arc::new(MockWebSearch::new(vec!["https://example.com".to_string()]));
    let node = node_with(
        MockLlm::new(r#""paris capital", "france capital city""#),
        search.clone(),
    );

    let state = scrapegraph::state::seeded("user_input", json!("capital of France?"));
    node.execute(state).await.expect("search succeeds");
    assert_eq!(search.queries(), vec!["paris capital".to_string()]);
}

/// **Scenario**: the node reports the model call's token usage to the engine.
#[tokio::test]
async fn usage_is_reported() {
    let usage = scrapegraph::TokenUsage {
        prompt_tokens: 21,
        completion_tokens: 4,
    };
    let node = node_with(
        MockLlm::new("query").with_usage(usage),
        Arc::new(MockWebSearch::new(vec!["https://example.com".to_string()])),
    );
    let state = scrapegraph::state::seeded("user_input", json!("anything"));
    node.execute(state).await.expect("search succeeds");
    assert_eq!(node.usage(), Some(usage));
}

/// **Scenario**: a missing input key is an execution error, not a panic.
#[tokio::test]
async fn missing_input_key_errors() {
    let node = node_with(
        MockLlm::new("query"),
        Arc::new(MockWebSearch::new(vec!["https://example.com".to_string()])),
    );
    let err = node.execute(State::new()).await.unwrap_err();
    assert!(matches!(err, NodeError::Execution(_)));
}

/// Search that times out a fixed number of times before succeeding.
struct FlakySearch {
    failures: u32,
    calls: AtomicU32,
    results: Vec<String>,
}

#[async_trait]
impl WebSearch for FlakySearch {
    async fn search(
        &self,
        _query: &str,
        _search_engine: SearchEngine,
        _max_results: usize,
    ) -> Result<Vec<String>, NodeError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            Err(NodeError::Timeout(1))
        } else {
            Ok(self.results.clone())
        }
    }
}

/// **Scenario**: transient search timeouts are retried inside the node; the
/// engine never sees them.
#[tokio::test]
async fn transient_search_failures_are_retried() {
    let search = Arc::new(FlakySearch {
        failures: 2,
        calls: AtomicU32::new(0),
        results: vec!["https://example.com".to_string()],
    });
    let node = SearchInternetNode::new(
        "user_input",
        vec!["search_results".to_string()],
        Arc::new(MockLlm::new("query")),
        search.clone(),
    )
    .with_retry_policy(RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
    });

    let state = scrapegraph::state::seeded("user_input", json!("anything"));
    let updated = node.execute(state).await.expect("retries succeed");
    assert_eq!(
        updated.get("search_results"),
        Some(&json!(["https://example.com"]))
    );
    assert_eq!(search.calls.load(Ordering::SeqCst), 3);
}

/// **Scenario**: retry exhaustion surfaces the timeout to the caller.
#[tokio::test]
async fn retry_exhaustion_surfaces_timeout() {
    let search = Arc::new(FlakySearch {
        failures: 10,
        calls: AtomicU32::new(0),
        results: vec![],
    });
    let node = SearchInternetNode::new(
        "user_input",
        vec!["search_results".to_string()],
        Arc::new(MockLlm::new("query")),
        search,
    )
    .with_retry_policy(RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
    });

    let state = scrapegraph::state::seeded("user_input", json!("anything"));
    let err = node.execute(state).await.unwrap_err();
    assert!(matches!(err, NodeError::Timeout(_)));
}

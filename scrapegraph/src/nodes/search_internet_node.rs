//! Search node: generate a query with the model, search the web, validate.
//!
//! Three stages per execute: GENERATE_QUERY (the user's natural-language
//! prompt is rarely a good search query, so the model rephrases it), SEARCH
//! (the configured engine, wrapped in bounded backoff), VALIDATE (downstream
//! nodes assume at least one source to scrape, so zero results fail fast
//! here).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::base_node::{required_str, Node};
use crate::error::NodeError;
use crate::llm::{LlmClient, TokenUsage};
use crate::prompts::{render, SEARCH_INTERNET_TEMPLATE};
use crate::state::State;
use crate::utils::research_web::SearchEngine;
use crate::utils::retry::{with_backoff, RetryPolicy};
use crate::web_search::WebSearch;

/// Searches the web for sources relevant to the user prompt.
///
/// Reads the single key named by `input` (the user prompt), writes the
/// result URL list to the first key of `output`.
pub struct SearchInternetNode {
    input: String,
    output: Vec<String>,
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn WebSearch>,
    search_engine: SearchEngine,
    max_results: usize,
    verbose: bool,
    retry: RetryPolicy,
    last_usage: Mutex<Option<TokenUsage>>,
}

impl SearchInternetNode {
    pub fn new(
        input: impl Into<String>,
        output: Vec<String>,
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn WebSearch>,
    ) -> Self {
        Self {
            input: input.into(),
            output,
            llm,
            search,
            search_engine: SearchEngine::DuckDuckGo,
            max_results: 10,
            verbose: false,
            retry: RetryPolicy::default(),
            last_usage: Mutex::new(None),
        }
    }

    pub fn with_search_engine(mut self, engine: SearchEngine) -> Self {
        self.search_engine = engine;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Interprets a model reply as a comma-separated list of candidate queries.
fn parse_comma_separated(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl Node for SearchInternetNode {
    fn node_name(&self) -> &str {
        "search_internet"
    }

    fn input(&self) -> &str {
        &self.input
    }

    fn output(&self) -> &[String] {
        &self.output
    }

    fn usage(&self) -> Option<TokenUsage> {
        *self.last_usage.lock().expect("usage lock poisoned")
    }

    async fn execute(&self, mut state: State) -> Result<State, NodeError> {
        let keys = self.input_keys();
        let prompt_key = keys.first().ok_or_else(|| {
            NodeError::Execution("search node has no input key declared".to_string())
        })?;
        let user_prompt = required_str(&state, prompt_key)?;

        // GENERATE_QUERY
        let prompt = render(SEARCH_INTERNET_TEMPLATE, &[("user_prompt", user_prompt)]);
        let response = self.llm.invoke(&prompt).await?;
        *self.last_usage.lock().expect("usage lock poisoned") = response.usage;
        let candidates = parse_comma_separated(&response.content);
        let query = candidates.into_iter().next().ok_or_else(|| {
            NodeError::Execution("the model returned no search query".to_string())
        })?;
        if self.verbose {
            tracing::info!(query = %query, "generated search query");
        } else {
            tracing::debug!(query = %query, "generated search query");
        }

        // SEARCH
        let results = with_backoff(self.retry, || {
            self.search
                .search(&query, self.search_engine, self.max_results)
        })
        .await?;

        // VALIDATE
        if results.is_empty() {
            return Err(NodeError::EmptyResult(
                "Zero results found for the search query.".to_string(),
            ));
        }
        if self.verbose {
            tracing::info!(results = results.len(), "search complete");
        }

        let out_key = self.output.first().ok_or_else(|| {
            NodeError::Execution("search node has no output key declared".to_string())
        })?;
        state.insert(
            out_key.clone(),
            Value::Array(results.into_iter().map(Value::String).collect()),
        );
        Ok(state)
    }
}

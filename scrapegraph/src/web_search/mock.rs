//! Mock WebSearch for tests and examples.
//!
//! Returns a fixed URL list (possibly empty, to exercise the zero-results
//! path) and records the queries it receives.

use async_trait::async_trait;
use std::sync::Mutex;

use super::WebSearch;
use crate::error::NodeError;
use crate::utils::research_web::SearchEngine;

/// Mock web search: fixed result list, query log for assertions.
pub struct MockWebSearch {
    results: Vec<String>,
    queries: Mutex<Vec<String>>,
}

impl MockWebSearch {
    /// Creates a mock returning `results` for every query.
    pub fn new(results: Vec<String>) -> Self {
        Self {
            results,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that finds nothing, for the zero-results path.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("mock query log poisoned").clone()
    }
}

#[async_trait]
impl WebSearch for MockWebSearch {
    async fn search(
        &self,
        query: &str,
        _search_engine: SearchEngine,
        max_results: usize,
    ) -> Result<Vec<String>, NodeError> {
        self.queries
            .lock()
            .expect("mock query log poisoned")
            .push(query.to_string());
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}

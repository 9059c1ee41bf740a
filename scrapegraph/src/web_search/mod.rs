//! Web-search capability behind a trait, so search-backed nodes are testable
//! without network access.
//!
//! `HttpSearch` is the production implementation delegating to
//! [`search_on_web`](crate::utils::search_on_web); `MockWebSearch` returns a
//! fixed result list for tests and examples.

mod mock;

pub use mock::MockWebSearch;

use async_trait::async_trait;

use crate::error::NodeError;
use crate::utils::research_web::{search_on_web, SearchEngine};

/// Web search: given a query, returns result URLs.
///
/// **Interaction**: consumed by `SearchInternetNode`; implementations own
/// engine selection details (API keys, local ports, timeouts).
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        search_engine: SearchEngine,
        max_results: usize,
    ) -> Result<Vec<String>, NodeError>;
}

/// Production search over HTTP, one reqwest client shared across calls.
pub struct HttpSearch {
    client: reqwest::Client,
    timeout: Option<u64>,
    api_key: Option<String>,
    port: Option<u16>,
}

impl HttpSearch {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: None,
            api_key: None,
            port: None,
        }
    }

    /// Per-request timeout in seconds (builder style).
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// API key for engines that need one (serper).
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Port of a local searxng instance.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

impl Default for HttpSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebSearch for HttpSearch {
    async fn search(
        &self,
        query: &str,
        search_engine: SearchEngine,
        max_results: usize,
    ) -> Result<Vec<String>, NodeError> {
        search_on_web(
            &self.client,
            query,
            search_engine,
            max_results,
            self.timeout,
            self.api_key.as_deref(),
            self.port,
        )
        .await
    }
}

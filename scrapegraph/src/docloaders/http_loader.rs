//! Plain-HTTP document loader over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;

use super::{Document, DocumentLoader};
use crate::error::NodeError;
use crate::utils::research_web::format_proxy;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches pages with HTTP GET, all URLs concurrently.
///
/// Optional proxy (structured descriptor or URL string, normalized through
/// `format_proxy`) and per-request timeout.
pub struct HttpLoader {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Per-request timeout in seconds (builder style).
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    /// Routes all requests through a proxy. Accepts either a structured
    /// descriptor or a preformatted proxy URL (see `format_proxy`).
    pub fn with_proxy(mut self, proxy: &Value) -> Result<Self, NodeError> {
        let proxy_url = format_proxy(proxy)?;
        let proxy = reqwest::Proxy::all(&proxy_url)
            .map_err(|e| NodeError::InvalidConfiguration(format!("invalid proxy URL: {e}")))?;
        self.client = reqwest::Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| NodeError::InvalidConfiguration(format!("proxy client build failed: {e}")))?;
        Ok(self)
    }

    async fn fetch_one(&self, url: &str) -> Result<Document, NodeError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| fetch_error(url, e, self.timeout))?;
        let page_content = response
            .text()
            .await
            .map_err(|e| fetch_error(url, e, self.timeout))?;
        Ok(Document {
            page_content,
            source: url.to_string(),
        })
    }
}

fn fetch_error(url: &str, err: reqwest::Error, timeout: Duration) -> NodeError {
    if err.is_timeout() {
        NodeError::Timeout(timeout.as_secs())
    } else {
        NodeError::Execution(format!("failed to fetch {url}: {err}"))
    }
}

impl Default for HttpLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentLoader for HttpLoader {
    async fn load(&self, urls: &[String]) -> Result<Vec<Document>, NodeError> {
        let fetches = urls.iter().map(|url| self.fetch_one(url));
        join_all(fetches).await.into_iter().collect()
    }
}

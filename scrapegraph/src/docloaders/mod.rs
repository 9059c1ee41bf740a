//! Document loading: turn URLs into page documents.
//!
//! Browser-driven rendering is an external collaborator; this module defines
//! the loader contract plus a plain-HTTP implementation and the scrape.do
//! service client.

mod http_loader;
mod scrape_do;

pub use http_loader::HttpLoader;
pub use scrape_do::{scrape_do_fetch, scrape_do_proxy_url};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// A fetched page: its content and the URL it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    pub source: String,
}

/// Loads a batch of URLs into documents.
///
/// Implementations may fetch concurrently, but present one async boundary to
/// the calling node. A failed URL fails the whole load.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, urls: &[String]) -> Result<Vec<Document>, NodeError>;
}

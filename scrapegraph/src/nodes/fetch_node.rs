//! Fetch node: load source URLs into documents.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::base_node::{required_value, Node};
use crate::docloaders::DocumentLoader;
use crate::error::NodeError;
use crate::state::State;
use crate::utils::research_web::filter_pdf_links;

/// Fetches pages for the URL list (or single URL) named by `input` and
/// writes the document list to the first key of `output`.
///
/// PDF links are dropped before fetching; downstream parsing assumes page
/// text.
pub struct FetchNode {
    input: String,
    output: Vec<String>,
    loader: Arc<dyn DocumentLoader>,
    verbose: bool,
}

impl FetchNode {
    pub fn new(
        input: impl Into<String>,
        output: Vec<String>,
        loader: Arc<dyn DocumentLoader>,
    ) -> Self {
        Self {
            input: input.into(),
            output,
            loader,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[async_trait]
impl Node for FetchNode {
    fn node_name(&self) -> &str {
        "fetch"
    }

    fn input(&self) -> &str {
        &self.input
    }

    fn output(&self) -> &[String] {
        &self.output
    }

    async fn execute(&self, mut state: State) -> Result<State, NodeError> {
        let keys = self.input_keys();
        let source_key = keys.first().ok_or_else(|| {
            NodeError::Execution("fetch node has no input key declared".to_string())
        })?;

        let urls: Vec<String> = match required_value(&state, source_key)? {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Value::String(url) => vec![url.clone()],
            _ => {
                return Err(NodeError::Execution(format!(
                    "state key '{source_key}' must be a URL string or list of URLs"
                )))
            }
        };
        let urls = filter_pdf_links(&urls);
        if self.verbose {
            tracing::info!(count = urls.len(), "fetching sources");
        }

        let documents = self.loader.load(&urls).await?;
        let out_key = self.output.first().ok_or_else(|| {
            NodeError::Execution("fetch node has no output key declared".to_string())
        })?;
        let value = serde_json::to_value(documents)
            .map_err(|e| NodeError::Execution(format!("document serialization failed: {e}")))?;
        state.insert(out_key.clone(), value);
        Ok(state)
    }
}

//! Configuration for wrapper graphs.
//!
//! Mirrors the `{"llm": {...}, "search_engine": ..., ...}` shape callers
//! pass in; serde-deserializable so it can be loaded from JSON as well as
//! built in code.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::NodeError;
use crate::llm::{LlmClient, MockLlm};

/// What the mock provider replies with; lets whole pipelines run offline.
const MOCK_REPLY: &str = "mock response";

/// Model selection and credentials, as `provider/model`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    /// `provider/model`, e.g. `"openai/gpt-4o-mini"` or `"ollama/llama3"`.
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Endpoint override; how azure_openai and self-hosted gateways are
    /// reached. Ollama defaults to its local endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl LlmConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            api_key: None,
            base_url: None,
        }
    }

    /// Splits `model` into provider and model name. Without a `/` the whole
    /// string is treated as the provider.
    fn split_model(&self) -> (&str, &str) {
        match self.model.split_once('/') {
            Some((provider, name)) => (provider, name),
            None => (self.model.as_str(), ""),
        }
    }

    /// Builds the LLM client for this configuration.
    ///
    /// Fails with a configuration error naming the provider when it is not
    /// supported; this happens at graph construction, before any node runs.
    pub fn create_llm(&self) -> Result<Arc<dyn LlmClient>, NodeError> {
        let (provider, model) = self.split_model();
        match provider {
            "mock" => Ok(Arc::new(MockLlm::new(MOCK_REPLY))),
            "openai" | "azure_openai" | "ollama" => self.create_openai_compatible(provider, model),
            other => Err(NodeError::InvalidConfiguration(format!(
                "Provider {other} is not supported"
            ))),
        }
    }

    #[cfg(feature = "openai")]
    fn create_openai_compatible(
        &self,
        provider: &str,
        model: &str,
    ) -> Result<Arc<dyn LlmClient>, NodeError> {
        use async_openai::config::OpenAIConfig;

        use crate::llm::ChatOpenAI;

        if model.is_empty() {
            return Err(NodeError::InvalidConfiguration(format!(
                "model name missing in '{}'",
                self.model
            )));
        }

        let mut config = OpenAIConfig::new();
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        let base_url = match (&self.base_url, provider) {
            (Some(url), _) => Some(url.clone()),
            (None, "ollama") => Some("http://localhost:11434/v1".to_string()),
            (None, "azure_openai") => {
                return Err(NodeError::InvalidConfiguration(
                    "Provider azure_openai requires a base_url".to_string(),
                ))
            }
            (None, _) => None,
        };
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }

        let mut client = ChatOpenAI::with_config(config, model);
        if let Some(t) = self.temperature {
            client = client.with_temperature(t);
        }
        Ok(Arc::new(client))
    }

    #[cfg(not(feature = "openai"))]
    fn create_openai_compatible(
        &self,
        provider: &str,
        _model: &str,
    ) -> Result<Arc<dyn LlmClient>, NodeError> {
        Err(NodeError::InvalidConfiguration(format!(
            "Provider {provider} requires the `openai` feature"
        )))
    }
}

/// Full wrapper-graph configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphConfig {
    pub llm: LlmConfig,
    #[serde(default = "default_search_engine")]
    pub search_engine: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub verbose: bool,
    /// Per-request timeout for search and fetch, in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// API key for engines that need one (serper).
    #[serde(default)]
    pub search_api_key: Option<String>,
    /// Port of a local searxng instance.
    #[serde(default)]
    pub searxng_port: Option<u16>,
}

fn default_search_engine() -> String {
    "duckduckgo".to_string()
}

fn default_max_results() -> usize {
    10
}

fn default_chunk_size() -> usize {
    4096
}

impl GraphConfig {
    pub fn new(llm: LlmConfig) -> Self {
        Self {
            llm,
            search_engine: default_search_engine(),
            max_results: default_max_results(),
            verbose: false,
            timeout: None,
            chunk_size: default_chunk_size(),
            search_api_key: None,
            searxng_port: None,
        }
    }
}

//! Mock LlmClient for tests and examples.
//!
//! Returns a fixed reply for every prompt; no API key or network required.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{LlmClient, LlmResponse, TokenUsage};
use crate::error::NodeError;

/// Mock LLM: fixed reply and optional fixed usage.
///
/// Records the prompts it receives so tests can assert on what a node
/// actually sent.
pub struct MockLlm {
    reply: String,
    usage: Option<TokenUsage>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Creates a mock that replies with `reply` to every prompt.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            usage: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Attach fixed token usage to every reply (builder style).
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock prompt log poisoned").clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, prompt: &str) -> Result<LlmResponse, NodeError> {
        self.prompts
            .lock()
            .expect("mock prompt log poisoned")
            .push(prompt.to_string());
        Ok(LlmResponse {
            content: self.reply.clone(),
            usage: self.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: the mock echoes its configured reply and logs prompts.
    #[tokio::test]
    async fn mock_replies_and_records() {
        let llm = MockLlm::new("capital of France");
        let response = llm.invoke("generate a query").await.unwrap();
        assert_eq!(response.content, "capital of France");
        assert!(response.usage.is_none());
        assert_eq!(llm.prompts(), vec!["generate a query".to_string()]);
    }
}

//! LLM client abstraction used by the model-backed nodes.
//!
//! Nodes depend on a callable that takes a rendered prompt and returns text
//! plus optional token usage; this module defines the trait, a mock
//! implementation, and (behind the `openai` feature) a real chat-completions
//! client for OpenAI-compatible providers.

mod mock;

#[cfg(feature = "openai")]
mod openai;

pub use mock::MockLlm;

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// Token counts reported by a model call; summed into the execution trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

impl std::ops::AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.prompt_tokens += rhs.prompt_tokens;
        self.completion_tokens += rhs.completion_tokens;
    }
}

/// Response from an LLM completion: the text and, when the provider reports
/// it, token usage.
pub struct LlmResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

/// LLM client: given a rendered prompt, returns the model's reply.
///
/// Treated as a pure capability with latency and possible failure (timeout,
/// malformed or refused response); the wire protocol is an implementation
/// detail. Implementations: `MockLlm` (fixed reply), `ChatOpenAI` (real API,
/// feature `openai`).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one completion: read the prompt, return the reply text and any
    /// usage the provider reports.
    async fn invoke(&self, prompt: &str) -> Result<LlmResponse, NodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: usage sums component-wise and totals both sides.
    #[test]
    fn token_usage_sums() {
        let mut usage = TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
        };
        usage += TokenUsage {
            prompt_tokens: 3,
            completion_tokens: 2,
        };
        assert_eq!(usage.prompt_tokens, 13);
        assert_eq!(usage.completion_tokens, 7);
        assert_eq!(usage.total(), 20);
    }
}

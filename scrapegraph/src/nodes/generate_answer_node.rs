//! Answer node: answer the user's question from scraped context.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::base_node::{required_str, required_value, Node};
use crate::docloaders::Document;
use crate::error::NodeError;
use crate::llm::{LlmClient, TokenUsage};
use crate::prompts::{render, GENERATE_ANSWER_TEMPLATE};
use crate::state::State;

/// Generates the final answer from the question and the scraped context.
///
/// `input` names two keys (e.g. `"user_prompt AND parsed_docs"`): the first
/// is the question, the second the context (chunk list, document list, or a
/// single string). Writes the answer to the first key of `output` and
/// reports the model call's token usage to the engine.
pub struct GenerateAnswerNode {
    input: String,
    output: Vec<String>,
    llm: Arc<dyn LlmClient>,
    verbose: bool,
    last_usage: Mutex<Option<TokenUsage>>,
}

impl GenerateAnswerNode {
    pub fn new(input: impl Into<String>, output: Vec<String>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            input: input.into(),
            output,
            llm,
            verbose: false,
            last_usage: Mutex::new(None),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Renders a context state value (chunks, documents, or plain text) into one
/// prompt block.
fn context_text(value: &Value) -> Result<String, NodeError> {
    if let Ok(docs) = serde_json::from_value::<Vec<Document>>(value.clone()) {
        return Ok(docs
            .into_iter()
            .map(|d| d.page_content)
            .collect::<Vec<_>>()
            .join("\n\n"));
    }
    match value {
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")),
        Value::String(text) => Ok(text.clone()),
        _ => Err(NodeError::Execution(
            "context state value holds no usable text".to_string(),
        )),
    }
}

#[async_trait]
impl Node for GenerateAnswerNode {
    fn node_name(&self) -> &str {
        "generate_answer"
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
        let (question_key, context_key) = match keys.as_slice() {
            [q, c, ..] => (q, c),
            _ => {
                return Err(NodeError::Execution(
                    "answer node needs a question key and a context key".to_string(),
                ))
            }
        };

        let question = required_str(&state, question_key)?;
        let context = context_text(required_value(&state, context_key)?)?;

        let prompt = render(
            GENERATE_ANSWER_TEMPLATE,
            &[("context", context.as_str()), ("question", question)],
        );
        let response = self.llm.invoke(&prompt).await?;
        *self.last_usage.lock().expect("usage lock poisoned") = response.usage;
        if self.verbose {
            tracing::info!(answer_len = response.content.len(), "answer generated");
        }

        let out_key = self.output.first().ok_or_else(|| {
            NodeError::Execution("answer node has no output key declared".to_string())
        })?;
        state.insert(out_key.clone(), Value::String(response.content));
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// **Scenario**: chunk lists, document lists and strings all render.
    #[test]
    fn context_text_accepts_all_shapes() {
        let chunks = json!(["first chunk", "second chunk"]);
        assert_eq!(context_text(&chunks).unwrap(), "first chunk\n\nsecond chunk");

        let docs = json!([
            { "page_content": "page one", "source": "https://a" },
            { "page_content": "page two", "source": "https://b" }
        ]);
        assert_eq!(context_text(&docs).unwrap(), "page one\n\npage two");

        assert_eq!(context_text(&json!("plain")).unwrap(), "plain");
        assert!(context_text(&json!(42)).is_err());
    }
}

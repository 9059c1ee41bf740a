//! Parse node: split fetched documents into bounded-size chunks.
//!
//! Structural HTML parsing is an external concern; this node prepares model
//! context by slicing page text on whitespace boundaries so no chunk exceeds
//! the configured size.

use async_trait::async_trait;
use serde_json::Value;

use super::base_node::{required_value, Node};
use crate::docloaders::Document;
use crate::error::NodeError;
use crate::state::State;

/// Default chunk bound in characters, sized for typical model context use.
const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Splits the documents named by `input` into chunks written to the first
/// key of `output`.
pub struct ParseNode {
    input: String,
    output: Vec<String>,
    chunk_size: usize,
}

impl ParseNode {
    pub fn new(input: impl Into<String>, output: Vec<String>) -> Self {
        Self {
            input: input.into(),
            output,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Splits `text` into chunks of at most `chunk_size` characters, breaking on
/// whitespace. A single word longer than the bound becomes its own chunk.
fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > chunk_size {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl Node for ParseNode {
    fn node_name(&self) -> &str {
        "parse"
    }

    fn input(&self) -> &str {
        &self.input
    }

    fn output(&self) -> &[String] {
        &self.output
    }

    async fn execute(&self, mut state: State) -> Result<State, NodeError> {
        let keys = self.input_keys();
        let docs_key = keys.first().ok_or_else(|| {
            NodeError::Execution("parse node has no input key declared".to_string())
        })?;
        let value = required_value(&state, docs_key)?;

        // Accept documents, plain strings, or one string.
        let texts: Vec<String> =
            if let Ok(docs) = serde_json::from_value::<Vec<Document>>(value.clone()) {
                docs.into_iter().map(|d| d.page_content).collect()
            } else {
                match value {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                    Value::String(text) => vec![text.clone()],
                    _ => {
                        return Err(NodeError::Execution(format!(
                            "state key '{docs_key}' holds no parsable documents"
                        )))
                    }
                }
            };

        let chunks: Vec<Value> = texts
            .iter()
            .flat_map(|text| split_into_chunks(text, self.chunk_size))
            .map(Value::String)
            .collect();

        let out_key = self.output.first().ok_or_else(|| {
            NodeError::Execution("parse node has no output key declared".to_string())
        })?;
        state.insert(out_key.clone(), Value::Array(chunks));
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: chunks break on whitespace and respect the bound.
    #[test]
    fn chunks_respect_bound() {
        let text = "one two three four five";
        let chunks = split_into_chunks(text, 9);
        assert_eq!(chunks, vec!["one two", "three", "four five"]);
        for chunk in &chunks {
            assert!(chunk.len() <= 9);
        }
    }

    /// **Scenario**: a word longer than the bound becomes its own chunk.
    #[test]
    fn oversized_word_is_own_chunk() {
        let chunks = split_into_chunks("short reallyreallylongword end", 10);
        assert!(chunks.contains(&"reallyreallylongword".to_string()));
    }

    /// **Scenario**: empty text produces no chunks.
    #[test]
    fn empty_text_no_chunks() {
        assert!(split_into_chunks("", 100).is_empty());
        assert!(split_into_chunks("   ", 100).is_empty());
    }
}

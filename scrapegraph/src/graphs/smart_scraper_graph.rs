//! Scraping pipeline: fetch a known source, answer the prompt from it.

use std::sync::Arc;

use serde_json::json;

use crate::docloaders::HttpLoader;
use crate::error::NodeError;
use crate::graph::{BaseGraph, CompiledGraph, ExecutionInfo, END, START};
use crate::graphs::config::GraphConfig;
use crate::nodes::{FetchNode, GenerateAnswerNode, ParseNode};
use crate::state::State;

/// fetch → parse → generate_answer over one source URL.
///
/// Unlike [`SearchGraph`](crate::graphs::SearchGraph), the source is given
/// by the caller, so no search step is needed.
pub struct SmartScraperGraph {
    prompt: String,
    source: String,
    graph: CompiledGraph,
    last_info: Option<ExecutionInfo>,
}

impl SmartScraperGraph {
    pub fn new(
        prompt: impl Into<String>,
        source: impl Into<String>,
        config: GraphConfig,
    ) -> Result<Self, NodeError> {
        let llm = config.llm.create_llm()?;

        let mut loader = HttpLoader::new();
        if let Some(secs) = config.timeout {
            loader = loader.with_timeout(secs);
        }

        let fetch_node = FetchNode::new("url", vec!["docs".to_string()], Arc::new(loader))
            .with_verbose(config.verbose);
        let parse_node = ParseNode::new("docs", vec!["parsed_docs".to_string()])
            .with_chunk_size(config.chunk_size);
        let answer_node = GenerateAnswerNode::new(
            "user_prompt AND parsed_docs",
            vec!["answer".to_string()],
            llm,
        )
        .with_verbose(config.verbose);

        let mut graph = BaseGraph::new();
        graph.add_node(Arc::new(fetch_node));
        graph.add_node(Arc::new(parse_node));
        graph.add_node(Arc::new(answer_node));
        graph.add_edge(START, "fetch");
        graph.add_edge("fetch", "parse");
        graph.add_edge("parse", "generate_answer");
        graph.add_edge("generate_answer", END);
        let graph = graph
            .compile()
            .map_err(|e| NodeError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            prompt: prompt.into(),
            source: source.into(),
            graph,
            last_info: None,
        })
    }

    /// Runs the pipeline and returns the answer.
    pub async fn run(&mut self) -> Result<String, NodeError> {
        let mut initial = State::new();
        initial.insert("user_prompt".to_string(), json!(self.prompt.clone()));
        initial.insert("url".to_string(), json!(self.source.clone()));
        let (final_state, info) = self.graph.execute(initial).await?;
        self.last_info = Some(info);
        final_state
            .get("answer")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| NodeError::Execution("graph produced no answer".to_string()))
    }

    /// Execution trace of the most recent `run`, if any.
    pub fn execution_info(&self) -> Option<&ExecutionInfo> {
        self.last_info.as_ref()
    }

    /// The underlying compiled graph (e.g. for the tracking bridge).
    pub fn graph(&self) -> &CompiledGraph {
        &self.graph
    }
}

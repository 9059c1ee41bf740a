//! Search pipeline: search the web, fetch sources, answer the prompt.

use std::sync::Arc;

use serde_json::json;

use crate::docloaders::HttpLoader;
use crate::error::NodeError;
use crate::graph::{BaseGraph, CompiledGraph, ExecutionInfo, END, START};
use crate::graphs::config::GraphConfig;
use crate::nodes::{FetchNode, GenerateAnswerNode, ParseNode, SearchInternetNode};
use crate::state;
use crate::utils::research_web::SearchEngine;
use crate::web_search::{HttpSearch, WebSearch};

/// search_internet → fetch → parse → generate_answer over one user prompt.
///
/// Configuration is validated in `new`: an unsupported provider or search
/// engine fails before any node executes.
pub struct SearchGraph {
    prompt: String,
    graph: CompiledGraph,
    last_info: Option<ExecutionInfo>,
}

impl SearchGraph {
    pub fn new(prompt: impl Into<String>, config: GraphConfig) -> Result<Self, NodeError> {
        let llm = config.llm.create_llm()?;
        let engine: SearchEngine = config.search_engine.parse()?;

        let mut search = HttpSearch::new();
        if let Some(secs) = config.timeout {
            search = search.with_timeout(secs);
        }
        if let Some(key) = &config.search_api_key {
            search = search.with_api_key(key.clone());
        }
        if let Some(port) = config.searxng_port {
            search = search.with_port(port);
        }
        let search: Arc<dyn WebSearch> = Arc::new(search);

        let mut loader = HttpLoader::new();
        if let Some(secs) = config.timeout {
            loader = loader.with_timeout(secs);
        }

        let search_node = SearchInternetNode::new(
            "user_prompt",
            vec!["urls".to_string()],
            llm.clone(),
            search,
        )
        .with_search_engine(engine)
        .with_max_results(config.max_results)
        .with_verbose(config.verbose);
        let fetch_node =
            FetchNode::new("urls", vec!["docs".to_string()], Arc::new(loader))
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
        graph.add_node(Arc::new(search_node));
        graph.add_node(Arc::new(fetch_node));
        graph.add_node(Arc::new(parse_node));
        graph.add_node(Arc::new(answer_node));
        graph.add_edge(START, "search_internet");
        graph.add_edge("search_internet", "fetch");
        graph.add_edge("fetch", "parse");
        graph.add_edge("parse", "generate_answer");
        graph.add_edge("generate_answer", END);
        let graph = graph
            .compile()
            .map_err(|e| NodeError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            prompt: prompt.into(),
            graph,
            last_info: None,
        })
    }

    /// Runs the pipeline and returns the answer.
    pub async fn run(&mut self) -> Result<String, NodeError> {
        let initial = state::seeded("user_prompt", json!(self.prompt.clone()));
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

//! # scrapegraph
//!
//! Graph-driven web research in Rust. Build pipelines of LLM, search and
//! scraping nodes with a simple **state-in, state-out** design: one shared
//! key-value state flows through the nodes of a compiled graph.
//!
//! ## Design Principles
//!
//! - **Single shared state**: an ordered key-value mapping ([`State`]) is
//!   threaded through the run; each node reads the keys named by its
//!   dependency expression and writes its declared outputs.
//! - **One unit of work per node**: a node implements a single async step:
//!   receive state, return updated state. Retries and error containment
//!   live inside nodes; the engine never retries.
//! - **Sequential execution**: nodes run strictly one at a time, because a
//!   node's inputs may be its predecessor's outputs. A node may fan out
//!   I/O internally (e.g. concurrent fetches) behind its one `execute`.
//!
//! ## Main Modules
//!
//! - [`graph`]: `BaseGraph`, `CompiledGraph`, `ExecutionInfo` — build and
//!   run graphs with direct and conditional edges.
//! - [`nodes`]: the `Node` contract and the built-in search / fetch /
//!   parse / answer nodes.
//! - [`llm`]: `LlmClient` trait, `MockLlm`, and optional `ChatOpenAI` via
//!   the `openai` feature.
//! - [`web_search`]: the `WebSearch` capability and its HTTP and mock
//!   implementations.
//! - [`graphs`]: ready-made pipelines (`SearchGraph`, `SmartScraperGraph`)
//!   driven by a serde config.
//! - [`integrations`]: bridge to an external workflow-tracking runtime.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use scrapegraph::{BaseGraph, Node, NodeError, State, END, START};
//! use serde_json::json;
//!
//! struct UppercaseNode {
//!     output: Vec<String>,
//! }
//!
//! #[async_trait]
//! impl Node for UppercaseNode {
//!     fn node_name(&self) -> &str { "uppercase" }
//!     fn input(&self) -> &str { "text" }
//!     fn output(&self) -> &[String] { &self.output }
//!     async fn execute(&self, mut state: State) -> Result<State, NodeError> {
//!         let upper = state
//!             .get("text")
//!             .and_then(|v| v.as_str())
//!             .unwrap_or_default()
//!             .to_uppercase();
//!         state.insert(self.output[0].clone(), json!(upper));
//!         Ok(state)
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut graph = BaseGraph::new();
//! graph.add_node(Arc::new(UppercaseNode {
//!     output: vec!["upper".to_string()],
//! }));
//! graph.add_edge(START, "uppercase");
//! graph.add_edge("uppercase", END);
//! let compiled = graph.compile().unwrap();
//!
//! let initial = scrapegraph::state::seeded("text", json!("hello"));
//! let (final_state, info) = compiled.execute(initial).await.unwrap();
//! assert_eq!(final_state.get("upper").unwrap(), "HELLO");
//! assert_eq!(info.node_names(), vec!["uppercase"]);
//! # }
//! ```

pub mod docloaders;
pub mod error;
pub mod graph;
pub mod graphs;
pub mod integrations;
pub mod llm;
pub mod nodes;
pub mod prompts;
pub mod state;
pub mod utils;
pub mod web_search;

pub use error::NodeError;
pub use graph::{BaseGraph, BuildError, CompiledGraph, Edge, ExecutionInfo, NodeExecution, END, START};
pub use graphs::{GraphConfig, LlmConfig, SearchGraph, SmartScraperGraph};
pub use integrations::{TrackerBridge, TrackerConfig, TrackingRuntime};
pub use llm::{LlmClient, LlmResponse, MockLlm, TokenUsage};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use docloaders::{Document, DocumentLoader, HttpLoader};
pub use nodes::{FetchNode, GenerateAnswerNode, Node, ParseNode, SearchInternetNode};
pub use state::State;
pub use utils::{filter_pdf_links, format_proxy, parse_expression, search_on_web, SearchEngine};
pub use web_search::{HttpSearch, MockWebSearch, WebSearch};

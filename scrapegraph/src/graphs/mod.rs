//! Ready-made pipelines over the graph engine.
//!
//! Each wrapper graph assembles a fixed node chain from a [`GraphConfig`],
//! validates the configuration up front (unsupported providers and engines
//! fail before any node executes), and exposes `run()` plus the last run's
//! execution trace.

mod config;
mod search_graph;
mod smart_scraper_graph;

pub use config::{GraphConfig, LlmConfig};
pub use search_graph::SearchGraph;
pub use smart_scraper_graph::SmartScraperGraph;

//! Library side of the scrapegraph CLI: build a search pipeline from CLI
//! options and run it.

use scrapegraph::{ExecutionInfo, GraphConfig, LlmConfig, NodeError, SearchGraph};

/// Options collected from flags and environment.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub prompt: String,
    /// `provider/model`, e.g. `"openai/gpt-4o-mini"`.
    pub model: String,
    pub search_engine: String,
    pub max_results: usize,
    pub timeout: Option<u64>,
    pub verbose: bool,
}

/// Builds the graph config, runs the search pipeline, and returns the answer
/// plus the run's execution trace.
pub async fn run(options: RunOptions) -> Result<(String, ExecutionInfo), NodeError> {
    let mut llm = LlmConfig::new(options.model);
    llm.api_key = std::env::var("OPENAI_API_KEY").ok();
    llm.base_url = std::env::var("OPENAI_API_BASE").ok();

    let mut config = GraphConfig::new(llm);
    config.search_engine = options.search_engine;
    config.max_results = options.max_results;
    config.timeout = options.timeout;
    config.verbose = options.verbose;
    config.search_api_key = std::env::var("SERPER_API_KEY").ok();

    let mut graph = SearchGraph::new(options.prompt, config)?;
    let answer = graph.run().await?;
    let info = graph
        .execution_info()
        .cloned()
        .unwrap_or_default();
    Ok((answer, info))
}

/// Renders the per-node timing table printed after a run.
pub fn format_execution_info(info: &ExecutionInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<20} {:>10} {:>10}\n", "node", "elapsed", "tokens"));
    for record in &info.records {
        let tokens = record
            .usage
            .map(|u| u.total().to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<20} {:>9.3}s {:>10}\n",
            record.node_name,
            record.elapsed.as_secs_f64(),
            tokens
        ));
    }
    out.push_str(&format!(
        "{:<20} {:>9.3}s {:>10}\n",
        "total",
        info.total_elapsed.as_secs_f64(),
        info.total_usage().total()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use scrapegraph::{NodeExecution, TokenUsage};

    /// **Scenario**: the table lists each node and a total row.
    #[test]
    fn execution_table_lists_nodes_and_total() {
        let info = ExecutionInfo {
            records: vec![
                NodeExecution {
                    node_name: "search_internet".into(),
                    elapsed: Duration::from_millis(120),
                    usage: Some(TokenUsage {
                        prompt_tokens: 30,
                        completion_tokens: 12,
                    }),
                },
                NodeExecution {
                    node_name: "fetch".into(),
                    elapsed: Duration::from_millis(340),
                    usage: None,
                },
            ],
            total_elapsed: Duration::from_millis(460),
        };
        let table = format_execution_info(&info);
        assert!(table.contains("search_internet"));
        assert!(table.contains("fetch"));
        assert!(table.contains("total"));
        assert!(table.contains("42"));
    }
}

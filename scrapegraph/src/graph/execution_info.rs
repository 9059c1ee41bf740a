//! Per-run execution trace: node timings and token usage.
//!
//! Owned by the engine, not part of the shared state; a fresh trace is
//! produced by every `execute` call, so runs never contaminate each other.

use std::time::Duration;

use crate::llm::TokenUsage;

/// One node's telemetry entry.
#[derive(Clone, Debug)]
pub struct NodeExecution {
    pub node_name: String,
    pub elapsed: Duration,
    /// Usage the node chose to report for this run, if any.
    pub usage: Option<TokenUsage>,
}

/// Ordered trace of one graph run.
#[derive(Clone, Debug, Default)]
pub struct ExecutionInfo {
    pub records: Vec<NodeExecution>,
    pub total_elapsed: Duration,
}

impl ExecutionInfo {
    /// Node names in execution order.
    pub fn node_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.node_name.as_str()).collect()
    }

    /// Token usage summed across all nodes that reported any.
    pub fn total_usage(&self) -> TokenUsage {
        let mut total = TokenUsage::default();
        for record in &self.records {
            if let Some(usage) = record.usage {
                total += usage;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: total_usage sums only the records that report usage.
    #[test]
    fn total_usage_sums_reporting_nodes() {
        let info = ExecutionInfo {
            records: vec![
                NodeExecution {
                    node_name: "a".into(),
                    elapsed: Duration::from_millis(5),
                    usage: Some(TokenUsage {
                        prompt_tokens: 10,
                        completion_tokens: 4,
                    }),
                },
                NodeExecution {
                    node_name: "b".into(),
                    elapsed: Duration::from_millis(3),
                    usage: None,
                },
                NodeExecution {
                    node_name: "c".into(),
                    elapsed: Duration::from_millis(2),
                    usage: Some(TokenUsage {
                        prompt_tokens: 1,
                        completion_tokens: 1,
                    }),
                },
            ],
            total_elapsed: Duration::from_millis(10),
        };
        let total = info.total_usage();
        assert_eq!(total.prompt_tokens, 11);
        assert_eq!(total.completion_tokens, 5);
        assert_eq!(info.node_names(), vec!["a", "b", "c"]);
    }
}

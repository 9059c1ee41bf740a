//! Graph engine: nodes + edge map, compile and execute.
//!
//! Build with `BaseGraph` (add nodes and edges, `START`/`END` sentinels for
//! entry and exit), `compile()` to validate, then execute a `CompiledGraph`
//! with an initial state to get the final state and the execution trace.

mod base_graph;
mod build_error;
mod compiled;
mod execution_info;

pub use base_graph::{BaseGraph, ConditionFn, Edge, END, START};
pub use build_error::BuildError;
pub use compiled::CompiledGraph;
pub use execution_info::{ExecutionInfo, NodeExecution};

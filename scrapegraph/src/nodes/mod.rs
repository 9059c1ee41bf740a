//! Graph nodes: units of work with declared input/output contracts.
//!
//! Each node reads the state keys named by its `input` dependency expression
//! and returns the state extended with its declared `output` keys. Nodes own
//! their error containment and retries; the engine treats them as opaque
//! fallible steps.

mod base_node;
mod fetch_node;
mod generate_answer_node;
mod parse_node;
mod search_internet_node;

pub use base_node::Node;
pub use fetch_node::FetchNode;
pub use generate_answer_node::GenerateAnswerNode;
pub use parse_node::ParseNode;
pub use search_internet_node::SearchInternetNode;

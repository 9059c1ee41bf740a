//! Supporting utilities: dependency-key parsing, web research helpers,
//! bounded retry with backoff.

pub mod parse_state_keys;
pub mod research_web;
pub mod retry;

pub use parse_state_keys::parse_expression;
pub use research_web::{filter_pdf_links, format_proxy, search_on_web, SearchEngine};
pub use retry::{with_backoff, RetryPolicy};

//! Bounded retry with exponential backoff for node-internal external calls.
//!
//! Resilience lives inside nodes, never in the engine: a node wraps its
//! single external call (search request, model inference) in `with_backoff`
//! and the engine sees either a value or the terminal error.

use std::future::Future;
use std::time::Duration;

use crate::error::NodeError;

/// Attempt bound and initial delay for [`with_backoff`]. Delay doubles after
/// each failed attempt.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries; useful for calls whose failure is
    /// meaningful on the first attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }
}

/// Runs `op` up to `policy.max_attempts` times, sleeping between attempts.
///
/// Only retryable errors (timeouts, transient execution failures) are
/// re-attempted; configuration and empty-result errors surface immediately.
/// The last error is returned after exhaustion.
pub async fn with_backoff<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, NodeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, NodeError>>,
{
    let mut delay = policy.base_delay;
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                tracing::debug!(attempt, error = %err, "retrying after backoff");
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
            Err(err) => return Err(err),
        }
    }
}

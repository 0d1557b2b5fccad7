//! Bounded retry for transient storage conflicts
//!
//! Concurrent donor responses can collide on the same request document;
//! the store surfaces that as a conflict error and the operation is safe
//! to retry. Retries are bounded and backed off with jitter so two
//! colliding writers don't retry in lockstep.

use crate::domain::result::Result;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Retry policy for conflict-prone store operations
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: usize,

    /// Backoff before each retry, in milliseconds; the last entry repeats
    pub backoff_ms: Vec<u64>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: vec![50, 150, 400],
        }
    }
}

impl RetryPolicy {
    /// Backoff duration before retry number `attempt` (1-based), with jitter
    fn backoff(&self, attempt: usize) -> Duration {
        let base = self
            .backoff_ms
            .get(attempt.saturating_sub(1))
            .or(self.backoff_ms.last())
            .copied()
            .unwrap_or(50);
        let jitter = rand::thread_rng().gen_range(0..=base / 2);
        Duration::from_millis(base + jitter)
    }
}

/// Runs `operation`, retrying on retryable errors per the policy
///
/// Non-retryable errors surface immediately; the last error surfaces once
/// attempts are exhausted.
pub async fn with_conflict_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                let backoff = policy.backoff(attempt);
                tracing::warn!(
                    operation = operation_name,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %e,
                    "Transient conflict, retrying"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

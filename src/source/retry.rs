//! Exponential backoff retry for document source calls.
//!
//! Only transient errors are retried. The budget is small on purpose: the
//! next tick is another retry, and a long backoff here would delay the other
//! collections in the same tick.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::SourceError;
use crate::sleep::Sleeper;

/// Configuration for exponential backoff retry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Cap for exponential growth.
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (typically 2.0).
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// 2 retries with 1s, 2s delays.
    pub const DEFAULT: Self = Self {
        max_retries: 2,
        initial_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(8),
        backoff_multiplier: 2.0,
    };

    /// No retries at all.
    pub const NONE: Self = Self {
        max_retries: 0,
        ..Self::DEFAULT
    };

    /// Computes the delay for the given retry attempt (0-indexed).
    ///
    /// `initial_delay * backoff_multiplier^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let delay_secs = self.initial_delay.as_secs_f64() * multiplier;
        Duration::from_secs_f64(delay_secs.min(self.max_delay.as_secs_f64()))
    }

    /// Returns an iterator over all retry delays.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_retries).map(|attempt| self.delay_for_attempt(attempt))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Runs `operation` until it succeeds, fails permanently, or the retry
/// budget is spent. Returns the last error in the failure cases.
pub async fn retry_with_backoff<T, F, Fut, S>(
    config: RetryConfig,
    sleeper: &S,
    mut operation: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
    S: Sleeper,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retriable() => return Err(e),
            Err(e) if attempt >= config.max_retries => {
                warn!(attempts = attempt + 1, error = %e, "Retries exhausted");
                return Err(e);
            }
            Err(e) => {
                let delay = config.delay_for_attempt(attempt);
                debug!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient source error, retrying"
                );
                sleeper.sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

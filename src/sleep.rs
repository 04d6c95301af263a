//! Injectable delays.
//!
//! The settle delay and retry backoff go through [`Sleeper`] so tests can
//! observe the requested delays without waiting for them.

use std::future::Future;
use std::time::Duration;

/// Suspends the current task for a duration.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

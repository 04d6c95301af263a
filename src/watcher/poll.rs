//! Polling configuration.
//!
//! # Polling Strategy
//!
//! - **Poll interval**: 60 seconds by default. Ticks never overlap: a tick
//!   that runs long makes the loop skip the ticks it missed.
//! - **Settle delay**: 20 seconds. When a settling collection shows new rows,
//!   the watcher waits this long and fetches again, so a person still filling
//!   in the row's fields is not announced half-way.
//! - **Fetch timeout**: 20 seconds per attempt, so one stuck collection
//!   cannot starve the others in the same tick.
//! - **Settle timeout**: 30 seconds for the whole settle re-fetch, retries
//!   included. On expiry the pre-settle rows are used.
//! - **Send timeout**: 30 seconds per announcement. A send that runs past it
//!   is dropped like any failed send, so a stalled chat API cannot hold up
//!   the next tick.

use std::time::Duration;

use crate::source::RetryConfig;
use crate::types::CollectionKind;

/// Default interval between ticks (60 seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Default settle delay for newly appeared rows (20 seconds).
pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 20;

/// Default per-attempt fetch timeout (20 seconds).
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Default bound on the settle re-fetch (30 seconds).
pub const DEFAULT_SETTLE_TIMEOUT_SECS: u64 = 30;

/// Default bound on one announcement send (30 seconds).
pub const DEFAULT_SEND_TIMEOUT_SECS: u64 = 30;

/// Rows fetched per poll of the feature collection.
pub const DEFAULT_FEATURE_PAGE_SIZE: u32 = 50;

/// Rows fetched per poll of the board and schedule collections.
pub const DEFAULT_ALARM_PAGE_SIZE: u32 = 20;

/// Timing and paging for the watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    pub poll_interval: Duration,
    pub settle_delay: Duration,
    pub fetch_timeout: Duration,
    pub settle_timeout: Duration,
    pub send_timeout: Duration,
    pub feature_page_size: u32,
    pub board_page_size: u32,
    pub schedule_page_size: u32,
    pub retry: RetryConfig,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PollConfig {
    pub fn new() -> Self {
        PollConfig {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            settle_delay: Duration::from_secs(DEFAULT_SETTLE_DELAY_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            settle_timeout: Duration::from_secs(DEFAULT_SETTLE_TIMEOUT_SECS),
            send_timeout: Duration::from_secs(DEFAULT_SEND_TIMEOUT_SECS),
            feature_page_size: DEFAULT_FEATURE_PAGE_SIZE,
            board_page_size: DEFAULT_ALARM_PAGE_SIZE,
            schedule_page_size: DEFAULT_ALARM_PAGE_SIZE,
            retry: RetryConfig::DEFAULT,
        }
    }

    pub fn page_size(&self, kind: CollectionKind) -> u32 {
        match kind {
            CollectionKind::Feature => self.feature_page_size,
            CollectionKind::Board => self.board_page_size,
            CollectionKind::Schedule => self.schedule_page_size,
        }
    }
}

//! Poll orchestration: the loop that turns collection changes into
//! announcements.
//!
//! # Module Structure
//!
//! - [`poll`]: timing and paging configuration
//! - [`evaluate`]: rows to messages, per collection
//! - [`format`]: message text
//! - [`report`]: per-tick outcomes and cycle phases

mod evaluate;
mod format;
mod poll;
mod report;
#[allow(clippy::module_inception)]
mod watcher;

#[cfg(test)]
mod tests;

pub use evaluate::{Evaluation, evaluate_board, evaluate_features, evaluate_schedule};
pub use format::{
    BOARD_NOTICE, FEATURE_COMPLETED_HEADER, FEATURE_REQUESTED_HEADER, NO_CONTENT, NO_DESCRIPTION,
    NO_TAGS, SCHEDULE_HEADER, batch, feature_line, schedule_line,
};
pub use poll::{
    DEFAULT_ALARM_PAGE_SIZE, DEFAULT_FEATURE_PAGE_SIZE, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SEND_TIMEOUT_SECS, DEFAULT_SETTLE_DELAY_SECS,
    DEFAULT_SETTLE_TIMEOUT_SECS, PollConfig,
};
pub use report::{CollectionOutcome, CyclePhase, PollSummary, TickReport};
pub use watcher::{CollectionTarget, WatchTargets, Watcher, WatcherConfig};

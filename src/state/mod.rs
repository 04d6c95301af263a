//! Pure state logic: classification, diffing and transition tracking.
//!
//! Nothing in this module performs I/O; the watcher feeds it fetched rows
//! and persists what it returns.

pub mod classify;
pub mod diff;
pub mod tracked;
pub mod transitions;

pub use classify::{StatusClassifier, any_completed, is_completed};
pub use diff::{RowDiff, diff};
pub use tracked::{Ledger, TrackedState};
pub use transitions::{StatusMap, Transition, classify_transition, join_labels, split_labels};

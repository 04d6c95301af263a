//! What a tick did, per collection.

use std::fmt;

use crate::types::CollectionKind;

/// Where a collection is within the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    #[default]
    Idle,
    Fetching,
    Settling,
    Evaluating,
    Notifying,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CyclePhase::Idle => "idle",
            CyclePhase::Fetching => "fetching",
            CyclePhase::Settling => "settling",
            CyclePhase::Evaluating => "evaluating",
            CyclePhase::Notifying => "notifying",
        };
        f.write_str(name)
    }
}

/// Counts from a regular (non-bootstrap) poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollSummary {
    /// Rows whose identifier had never been seen.
    pub new_rows: usize,
    /// Feature rows announced as completed (new or transitioned).
    pub completed: usize,
    /// Whether the settle re-fetch ran.
    pub settled: bool,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

/// Result of one collection's share of a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// No identifier or destination configured.
    Disabled,
    /// The fetch failed; tracked state was left as it was.
    SourceUnavailable { error: String },
    /// First successful poll: rows adopted as baseline, nothing announced.
    Bootstrapped { adopted: usize },
    Polled(PollSummary),
}

/// Outcomes of one tick, in polling order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub outcomes: Vec<(CollectionKind, CollectionOutcome)>,
    /// Saves of the state file that failed during this tick.
    pub persist_failures: usize,
}

impl TickReport {
    pub fn get(&self, kind: CollectionKind) -> Option<&CollectionOutcome> {
        self.outcomes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }

    pub fn notifications_sent(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, outcome)| match outcome {
                CollectionOutcome::Polled(summary) => summary.notifications_sent,
                _ => 0,
            })
            .sum()
    }
}

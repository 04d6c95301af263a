//! In-memory tracked state for each watched collection.

use std::collections::BTreeSet;

use serde::Serialize;

use super::diff::RowDiff;
use super::transitions::StatusMap;
use crate::types::{CollectionKind, RowId};

/// What the herald remembers about one collection between polls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackedState {
    /// Every row id observed by a successful poll. Only ever grows.
    pub seen_ids: BTreeSet<RowId>,

    /// Last known labels per row (feature collection only).
    pub status_by_id: StatusMap,

    /// Whether a poll has ever completed for this collection. Until it has,
    /// every row is baseline and nothing is announced.
    pub initialized: bool,
}

impl TrackedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the next successful poll is the bootstrap poll.
    pub fn is_bootstrap(&self) -> bool {
        !self.initialized
    }

    /// Absorbs a poll's identifiers into the baseline and marks the
    /// collection initialized.
    pub fn absorb(&mut self, diff: &RowDiff) {
        self.seen_ids.extend(diff.current_ids.iter().cloned());
        self.initialized = true;
    }
}

/// Tracked state for all collections, persisted as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    pub features: TrackedState,
    pub boards: TrackedState,
    pub schedules: TrackedState,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: CollectionKind) -> &TrackedState {
        match kind {
            CollectionKind::Feature => &self.features,
            CollectionKind::Board => &self.boards,
            CollectionKind::Schedule => &self.schedules,
        }
    }

    pub fn get_mut(&mut self, kind: CollectionKind) -> &mut TrackedState {
        match kind {
            CollectionKind::Feature => &mut self.features,
            CollectionKind::Board => &mut self.boards,
            CollectionKind::Schedule => &mut self.schedules,
        }
    }
}

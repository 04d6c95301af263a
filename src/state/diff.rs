//! Row diff: which identifiers appeared since the previous poll.
//!
//! Pure set arithmetic, no I/O. The orchestrator decides what a non-empty
//! `new_ids` means (on the bootstrap poll, nothing).

use std::collections::BTreeSet;

use crate::types::{Row, RowId};

/// Result of diffing a fetch against the previously seen identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDiff {
    /// Identifiers in the current fetch.
    pub current_ids: BTreeSet<RowId>,
    /// `current_ids - previous`.
    pub new_ids: BTreeSet<RowId>,
    /// `previous - current_ids`. Informational: rows drop off a bounded,
    /// newest-first page all the time, so this never un-sees anything.
    pub removed_ids: BTreeSet<RowId>,
}

impl RowDiff {
    pub fn has_new(&self) -> bool {
        !self.new_ids.is_empty()
    }

    pub fn is_new(&self, id: &RowId) -> bool {
        self.new_ids.contains(id)
    }

    /// Identifiers present both before and now.
    pub fn unchanged_ids(&self) -> impl Iterator<Item = &RowId> {
        self.current_ids.difference(&self.new_ids)
    }
}

/// Diffs the rows of a fetch against the previously seen identifiers.
pub fn diff(previous: &BTreeSet<RowId>, current_rows: &[Row]) -> RowDiff {
    let current_ids: BTreeSet<RowId> = current_rows.iter().map(|row| row.id.clone()).collect();
    let new_ids = current_ids.difference(previous).cloned().collect();
    let removed_ids = previous.difference(&current_ids).cloned().collect();

    RowDiff {
        current_ids,
        new_ids,
        removed_ids,
    }
}

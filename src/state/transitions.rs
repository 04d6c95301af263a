//! Completion transitions for tracked rows.
//!
//! Each fetched row's status labels are compared with the labels recorded for
//! it on the previous poll. Only the incomplete → complete edge is
//! alert-worthy; steady completion and reverts are silent. A revert followed
//! by a new completion is a legitimate second edge and fires again.

use std::collections::BTreeMap;

use super::classify::StatusClassifier;
use crate::types::RowId;

/// Separator used when storing a row's labels in the status map.
pub const LABEL_SEPARATOR: char = ',';

/// Recorded labels per row, as a comma-joined string.
pub type StatusMap = BTreeMap<RowId, String>;

/// What happened to a row's completion signal on this observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First observation of the row; recorded, not alerted.
    FirstSeen,
    /// The row went from not completed to completed.
    BecameComplete,
    /// No alert-worthy change.
    NoChange,
}

impl Transition {
    pub fn is_alert(&self) -> bool {
        matches!(self, Transition::BecameComplete)
    }
}

/// Joins labels into their stored form.
pub fn join_labels<S: AsRef<str>>(labels: &[S]) -> String {
    labels
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&LABEL_SEPARATOR.to_string())
}

/// Splits a stored label string back into trimmed, non-empty labels.
pub fn split_labels(stored: &str) -> Vec<String> {
    stored
        .split(LABEL_SEPARATOR)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classifies the row's transition and refreshes its entry in `status_map`.
///
/// The entry is overwritten with `current_labels` whenever they are
/// non-empty, regardless of the outcome; an empty observation leaves the
/// previous record in place. A row first observed without labels is recorded
/// with an empty entry, which counts as not completed.
pub fn classify_transition(
    row_id: &RowId,
    current_labels: &[String],
    status_map: &mut StatusMap,
    classifier: &StatusClassifier,
) -> Transition {
    let transition = match status_map.get(row_id) {
        None => Transition::FirstSeen,
        Some(previous) => {
            let prev_complete = classifier.any_completed(&split_labels(previous));
            let curr_complete = classifier.any_completed(current_labels);
            if curr_complete && !prev_complete {
                Transition::BecameComplete
            } else {
                Transition::NoChange
            }
        }
    };

    if !current_labels.is_empty() || transition == Transition::FirstSeen {
        status_map.insert(row_id.clone(), join_labels(current_labels));
    }

    transition
}

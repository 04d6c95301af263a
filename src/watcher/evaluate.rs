//! Turning a poll's rows into announcement messages.
//!
//! These functions are pure apart from the status map they are handed; the
//! watcher decides when their output is committed and sent.

use std::collections::BTreeSet;

use super::format::{
    BOARD_NOTICE, FEATURE_COMPLETED_HEADER, FEATURE_REQUESTED_HEADER, SCHEDULE_HEADER, batch,
    feature_line, schedule_line,
};
use crate::properties::{FieldMap, extract_date, extract_labels, extract_text};
use crate::state::{StatusClassifier, StatusMap, Transition, classify_transition, join_labels};
use crate::types::{Row, RowId};

/// Messages for one collection plus the counts that go into the tick report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub messages: Vec<String>,
    pub new_rows: usize,
    pub completed: usize,
}

/// Feature collection: request, new-completed and transition batches.
///
/// New rows are bucketed by their current labels, which are recorded in
/// `status_map` before the transition pass so a new row never also counts
/// as a transition. A new row without labels is recorded as not completed,
/// so a later completion is an edge. Every row then goes through the
/// transition tracker.
pub fn evaluate_features(
    rows: &[Row],
    new_ids: &BTreeSet<RowId>,
    status_map: &mut StatusMap,
    fields: &FieldMap,
    classifier: &StatusClassifier,
) -> Evaluation {
    let line_for = |row: &Row| {
        feature_line(
            &extract_text(&row.properties, &fields.feature_content),
            &extract_text(&row.properties, &fields.feature_description),
        )
    };

    let mut requested = Vec::new();
    let mut completed_new = Vec::new();
    for row in rows.iter().filter(|row| new_ids.contains(&row.id)) {
        let labels = extract_labels(&row.properties, &fields.feature_status);
        if classifier.any_completed(&labels) {
            completed_new.push(line_for(row));
        } else {
            requested.push(line_for(row));
        }
        status_map.insert(row.id.clone(), join_labels(&labels));
    }

    let mut transitioned = Vec::new();
    for row in rows {
        let labels = extract_labels(&row.properties, &fields.feature_status);
        if classify_transition(&row.id, &labels, status_map, classifier)
            == Transition::BecameComplete
        {
            transitioned.push(line_for(row));
        }
    }

    let completed = completed_new.len() + transitioned.len();
    let messages = [
        batch(FEATURE_REQUESTED_HEADER, &requested),
        batch(FEATURE_COMPLETED_HEADER, &completed_new),
        batch(FEATURE_COMPLETED_HEADER, &transitioned),
    ]
    .into_iter()
    .flatten()
    .collect();

    Evaluation {
        messages,
        new_rows: new_ids.len(),
        completed,
    }
}

/// Board collection: one fixed notice when anything new appeared.
pub fn evaluate_board(new_ids: &BTreeSet<RowId>) -> Evaluation {
    let messages = if new_ids.is_empty() {
        Vec::new()
    } else {
        vec![BOARD_NOTICE.to_string()]
    };
    Evaluation {
        messages,
        new_rows: new_ids.len(),
        completed: 0,
    }
}

/// Schedule collection: one line per new row still present in `rows`.
pub fn evaluate_schedule(rows: &[Row], new_ids: &BTreeSet<RowId>, fields: &FieldMap) -> Evaluation {
    let lines: Vec<String> = rows
        .iter()
        .filter(|row| new_ids.contains(&row.id))
        .map(|row| {
            let tags = extract_labels(&row.properties, &fields.schedule_tags);
            let date = extract_date(&row.properties, &fields.schedule_date);
            schedule_line(&tags, date.as_ref())
        })
        .collect();

    Evaluation {
        messages: batch(SCHEDULE_HEADER, &lines).into_iter().collect(),
        new_rows: new_ids.len(),
        completed: 0,
    }
}

//! Shared test utilities: proptest generators and in-memory collaborators.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use proptest::prelude::*;

use crate::sink::{NotificationSink, SinkError};
use crate::sleep::Sleeper;
use crate::source::{DocumentSource, SourceError};
use crate::state::{Ledger, TrackedState};
use crate::types::{ChannelId, CollectionId, PropertyValue, Row, RowId};

// ─── Generators ───

pub fn arb_row_id() -> impl Strategy<Value = RowId> {
    "[0-9a-f]{8}-[0-9a-f]{4}".prop_map(RowId::from)
}

pub fn arb_status_labels() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("완료".to_string()),
            Just("진행 중".to_string()),
            Just("Done".to_string()),
            "[a-z]{1,8}",
        ],
        1..3,
    )
    .prop_map(|labels| labels.join(","))
}

/// Tracked state without status labels (board and schedule collections).
pub fn arb_plain_state() -> impl Strategy<Value = TrackedState> {
    (prop::collection::btree_set(arb_row_id(), 0..10), any::<bool>()).prop_map(
        |(seen_ids, initialized)| TrackedState {
            seen_ids,
            status_by_id: Default::default(),
            initialized,
        },
    )
}

pub fn arb_feature_state() -> impl Strategy<Value = TrackedState> {
    (
        prop::collection::btree_set(arb_row_id(), 0..10),
        prop::collection::btree_map(arb_row_id(), arb_status_labels(), 0..10),
        any::<bool>(),
    )
        .prop_map(|(seen_ids, status_by_id, initialized)| TrackedState {
            seen_ids,
            status_by_id,
            initialized,
        })
}

pub fn arb_ledger() -> impl Strategy<Value = Ledger> {
    (arb_feature_state(), arb_plain_state(), arb_plain_state()).prop_map(
        |(features, boards, schedules)| Ledger {
            features,
            boards,
            schedules,
        },
    )
}

// ─── Row builders ───

/// A feature row as the workspace lays it out.
pub fn feature_row(id: &str, status: &str, content: &str, description: &str) -> Row {
    Row::new(id)
        .with_property("상태", PropertyValue::Status(Some(status.to_string())))
        .with_property("내용", PropertyValue::Title(vec![content.to_string()]))
        .with_property("설명", PropertyValue::RichText(vec![description.to_string()]))
}

// ─── Collaborators ───

/// Records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// A scripted response: rows, or an HTTP status to fail with.
#[derive(Debug, Clone)]
pub enum Scripted {
    Rows(Vec<Row>),
    Fail(u16),
}

/// Document source that replays scripted responses per collection.
///
/// Responses are consumed in order; the last one repeats forever. An
/// unscripted collection fails with 404.
#[derive(Debug, Default)]
pub struct FakeSource {
    scripts: Mutex<HashMap<CollectionId, VecDeque<Scripted>>>,
    calls: Mutex<Vec<(CollectionId, u32)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends responses for `collection`.
    pub fn script(&self, collection: &str, responses: impl IntoIterator<Item = Scripted>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(CollectionId::new(collection))
            .or_default()
            .extend(responses);
    }

    /// Queues one successful response.
    pub fn push_rows(&self, collection: &str, rows: Vec<Row>) {
        self.script(collection, [Scripted::Rows(rows)]);
    }

    pub fn calls(&self) -> Vec<(CollectionId, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, collection: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c.as_str() == collection)
            .count()
    }
}

impl DocumentSource for FakeSource {
    async fn query(&self, collection: &CollectionId, page_size: u32) -> Result<Vec<Row>, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push((collection.clone(), page_size));

        let next = {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(collection) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match next {
            Some(Scripted::Rows(rows)) => Ok(rows),
            Some(Scripted::Fail(status)) => Err(SourceError::from_status(status, "scripted failure")),
            None => Err(SourceError::from_status(404, "unscripted collection")),
        }
    }
}

/// Notification sink that records every message.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(ChannelId, String)>>,
    failing: Mutex<HashSet<ChannelId>>,
    stalled: Mutex<HashSet<ChannelId>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every send to `channel` fail.
    pub fn fail_channel(&self, channel: ChannelId) {
        self.failing.lock().unwrap().insert(channel);
    }

    /// Makes every send to `channel` hang forever.
    pub fn stall_channel(&self, channel: ChannelId) {
        self.stalled.lock().unwrap().insert(channel);
    }

    pub fn sent(&self) -> Vec<(ChannelId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, channel: ChannelId) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), SinkError> {
        if self.stalled.lock().unwrap().contains(&channel) {
            std::future::pending::<()>().await;
        }
        if self.failing.lock().unwrap().contains(&channel) {
            return Err(SinkError::Status {
                status: 500,
                body: "scripted failure".to_string(),
            });
        }
        self.sent.lock().unwrap().push((channel, text.to_string()));
        Ok(())
    }
}

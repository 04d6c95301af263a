//! The polling loop.
//!
//! One [`Watcher`] owns the [`Ledger`] for all three collections. Each tick
//! polls the collections one after another; a collection's poll is
//!
//! 1. fetch (timeout + retry),
//! 2. diff against the seen ids,
//! 3. settle when new rows appeared in a settling collection,
//! 4. evaluate into messages,
//! 5. commit the new baseline and persist it,
//! 6. send the messages, each under the send timeout.
//!
//! # Critical Invariant
//!
//! State is persisted before any message is sent. A crash between the two
//! loses the pending messages but never announces the same rows twice.

use std::collections::{BTreeMap, BTreeSet};

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::evaluate::{Evaluation, evaluate_board, evaluate_features, evaluate_schedule};
use super::poll::PollConfig;
use super::report::{CollectionOutcome, CyclePhase, PollSummary, TickReport};
use crate::persistence::StateStore;
use crate::properties::FieldMap;
use crate::sink::{NotificationSink, SinkError};
use crate::sleep::{Sleeper, TokioSleeper};
use crate::source::{DocumentSource, SourceError, retry_with_backoff};
use crate::state::{Ledger, RowDiff, StatusClassifier, diff};
use crate::types::{ChannelId, CollectionId, CollectionKind, Row, RowId};

/// Where a collection is read from and where its announcements go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTarget {
    pub collection: CollectionId,
    pub channel: ChannelId,
}

impl CollectionTarget {
    pub fn new(collection: impl Into<String>, channel: impl Into<ChannelId>) -> Self {
        CollectionTarget {
            collection: CollectionId::new(collection),
            channel: channel.into(),
        }
    }
}

/// Configured targets; a missing target disables that collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchTargets {
    pub features: Option<CollectionTarget>,
    pub boards: Option<CollectionTarget>,
    pub schedules: Option<CollectionTarget>,
}

impl WatchTargets {
    pub fn get(&self, kind: CollectionKind) -> Option<&CollectionTarget> {
        match kind {
            CollectionKind::Feature => self.features.as_ref(),
            CollectionKind::Board => self.boards.as_ref(),
            CollectionKind::Schedule => self.schedules.as_ref(),
        }
    }
}

/// Everything the watcher needs besides its collaborators.
#[derive(Debug, Clone, Default)]
pub struct WatcherConfig {
    pub targets: WatchTargets,
    pub poll: PollConfig,
    pub fields: FieldMap,
    pub classifier: StatusClassifier,
}

/// Polls the document source and announces changes.
pub struct Watcher<S, N, C = TokioSleeper> {
    source: S,
    sink: N,
    sleeper: C,
    config: WatcherConfig,
    store: StateStore,
    ledger: Ledger,
    phases: BTreeMap<CollectionKind, CyclePhase>,
}

impl<S, N, C> Watcher<S, N, C>
where
    S: DocumentSource,
    N: NotificationSink,
    C: Sleeper,
{
    /// Creates a watcher, loading its ledger from `store`.
    ///
    /// An unreadable state file is moved aside and the watcher starts empty.
    pub fn new(source: S, sink: N, sleeper: C, config: WatcherConfig, store: StateStore) -> Self {
        let ledger = store.load_or_recover();
        Self::with_ledger(source, sink, sleeper, config, store, ledger)
    }

    /// Creates a watcher with an already loaded ledger.
    pub fn with_ledger(
        source: S,
        sink: N,
        sleeper: C,
        config: WatcherConfig,
        store: StateStore,
        ledger: Ledger,
    ) -> Self {
        Watcher {
            source,
            sink,
            sleeper,
            config,
            store,
            ledger,
            phases: BTreeMap::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sleeper(&self) -> &C {
        &self.sleeper
    }

    pub fn phase(&self, kind: CollectionKind) -> CyclePhase {
        self.phases.get(&kind).copied().unwrap_or_default()
    }

    fn set_phase(&mut self, kind: CollectionKind, phase: CyclePhase) {
        let previous = self.phases.insert(kind, phase).unwrap_or_default();
        if previous != phase {
            debug!(collection = %kind, from = %previous, to = %phase, "Phase change");
        }
    }

    /// Runs ticks every poll interval until `shutdown` is cancelled.
    ///
    /// The first tick runs immediately. A tick that overruns the interval
    /// causes the missed ticks to be skipped, never queued.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.config.poll.poll_interval.as_secs(),
            "Watcher started"
        );
        for kind in CollectionKind::ALL {
            if self.config.targets.get(kind).is_none() {
                warn!(collection = %kind, "Collection not configured, polling disabled");
            }
        }

        let mut interval = tokio::time::interval(self.config.poll.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown signal received, stopping watcher");
                    break;
                }

                _ = interval.tick() => {
                    tokio::select! {
                        _ = shutdown.cancelled() => {
                            info!("Shutdown signal received mid-tick, abandoning tick");
                            break;
                        }
                        report = self.tick() => {
                            debug!(
                                notifications = report.notifications_sent(),
                                persist_failures = report.persist_failures,
                                "Tick complete"
                            );
                        }
                    }
                }
            }
        }
    }

    /// Polls every collection once, in order.
    #[instrument(skip(self))]
    pub async fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        for kind in CollectionKind::ALL {
            let outcome = match self.config.targets.get(kind).cloned() {
                Some(target) => self.poll_collection(kind, &target, &mut report).await,
                None => CollectionOutcome::Disabled,
            };
            report.outcomes.push((kind, outcome));
        }
        report
    }

    #[instrument(skip_all, fields(collection = %kind))]
    async fn poll_collection(
        &mut self,
        kind: CollectionKind,
        target: &CollectionTarget,
        report: &mut TickReport,
    ) -> CollectionOutcome {
        self.set_phase(kind, CyclePhase::Fetching);
        let rows = match self.fetch(kind, target).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Fetch failed, leaving state untouched");
                self.set_phase(kind, CyclePhase::Idle);
                return CollectionOutcome::SourceUnavailable {
                    error: e.to_string(),
                };
            }
        };

        let bootstrap = self.ledger.get(kind).is_bootstrap();
        let row_diff = diff(&self.ledger.get(kind).seen_ids, &rows);
        if !row_diff.removed_ids.is_empty() {
            debug!(removed = row_diff.removed_ids.len(), "Seen rows absent from this page");
        }

        let settling = !bootstrap && row_diff.has_new() && kind.settles();
        let settled_rows = if settling {
            self.settle(kind, target, &rows).await
        } else {
            rows
        };

        self.set_phase(kind, CyclePhase::Evaluating);
        let new_ids = if bootstrap {
            BTreeSet::new()
        } else {
            row_diff.new_ids.clone()
        };
        let evaluation = self.evaluate(kind, &settled_rows, &new_ids);

        if !self.commit(kind, &row_diff) {
            report.persist_failures += 1;
        }

        if bootstrap {
            info!(adopted = row_diff.current_ids.len(), "Bootstrap poll, adopted baseline");
            self.set_phase(kind, CyclePhase::Idle);
            return CollectionOutcome::Bootstrapped {
                adopted: row_diff.current_ids.len(),
            };
        }

        if evaluation.new_rows > 0 || evaluation.completed > 0 {
            info!(
                new = evaluation.new_rows,
                completed = evaluation.completed,
                messages = evaluation.messages.len(),
                "Changes detected"
            );
        }

        self.set_phase(kind, CyclePhase::Notifying);
        let (sent, failed) = self.dispatch(kind, target.channel, &evaluation.messages).await;
        self.set_phase(kind, CyclePhase::Idle);

        CollectionOutcome::Polled(PollSummary {
            new_rows: evaluation.new_rows,
            completed: evaluation.completed,
            settled: settling,
            notifications_sent: sent,
            notifications_failed: failed,
        })
    }

    async fn fetch(
        &self,
        kind: CollectionKind,
        target: &CollectionTarget,
    ) -> Result<Vec<Row>, SourceError> {
        let page_size = self.config.poll.page_size(kind);
        let limit = self.config.poll.fetch_timeout;
        let source = &self.source;
        let collection = &target.collection;

        retry_with_backoff(self.config.poll.retry, &self.sleeper, || async move {
            tokio::time::timeout(limit, source.query(collection, page_size))
                .await
                .unwrap_or_else(|_| Err(SourceError::timed_out(limit)))
        })
        .await
    }

    /// Waits for edits to settle, then fetches again.
    ///
    /// Falls back to `rows` if the re-fetch fails or runs past the settle
    /// timeout.
    async fn settle(
        &mut self,
        kind: CollectionKind,
        target: &CollectionTarget,
        rows: &[Row],
    ) -> Vec<Row> {
        self.set_phase(kind, CyclePhase::Settling);
        let delay = self.config.poll.settle_delay;
        info!(delay_secs = delay.as_secs(), "New rows, waiting for edits to settle");
        self.sleeper.sleep(delay).await;

        let limit = self.config.poll.settle_timeout;
        match tokio::time::timeout(limit, self.fetch(kind, target)).await {
            Ok(Ok(fresh)) => fresh,
            Ok(Err(e)) => {
                warn!(error = %e, "Settle re-fetch failed, using pre-settle rows");
                rows.to_vec()
            }
            Err(_) => {
                warn!(timeout_secs = limit.as_secs(), "Settle re-fetch timed out, using pre-settle rows");
                rows.to_vec()
            }
        }
    }

    fn evaluate(
        &mut self,
        kind: CollectionKind,
        rows: &[Row],
        new_ids: &BTreeSet<RowId>,
    ) -> Evaluation {
        match kind {
            CollectionKind::Feature => evaluate_features(
                rows,
                new_ids,
                &mut self.ledger.features.status_by_id,
                &self.config.fields,
                &self.config.classifier,
            ),
            CollectionKind::Board => evaluate_board(new_ids),
            CollectionKind::Schedule => evaluate_schedule(rows, new_ids, &self.config.fields),
        }
    }

    /// Absorbs the poll into the baseline and persists the ledger.
    ///
    /// Returns false if the save failed; the in-memory ledger stays
    /// authoritative either way.
    fn commit(&mut self, kind: CollectionKind, row_diff: &RowDiff) -> bool {
        self.ledger.get_mut(kind).absorb(row_diff);
        match self.store.save(&self.ledger) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    collection = %kind,
                    path = %self.store.path().display(),
                    error = %e,
                    "Failed to persist state"
                );
                false
            }
        }
    }

    async fn dispatch(
        &self,
        kind: CollectionKind,
        channel: ChannelId,
        messages: &[String],
    ) -> (usize, usize) {
        let limit = self.config.poll.send_timeout;
        let mut sent = 0;
        let mut failed = 0;
        for text in messages {
            let result = tokio::time::timeout(limit, self.sink.send(channel, text))
                .await
                .unwrap_or(Err(SinkError::TimedOut(limit)));
            match result {
                Ok(()) => sent += 1,
                Err(e) => {
                    error!(collection = %kind, channel = %channel, error = %e, "Notification dropped");
                    failed += 1;
                }
            }
        }
        (sent, failed)
    }
}

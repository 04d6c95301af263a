//! Scenario tests for the watcher.
//!
//! Each test drives whole ticks against an in-memory source, sink and
//! sleeper, with the state file in a temp dir.

use std::path::Path;
use std::time::Duration;

use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

use crate::persistence::StateStore;
use crate::source::RetryConfig;
use crate::state::Ledger;
use crate::test_utils::{FakeSource, RecordingSink, RecordingSleeper, Scripted, feature_row};
use crate::types::{ChannelId, CollectionKind, DateRange, PropertyValue, Row, RowId};

use super::{
    BOARD_NOTICE, CollectionOutcome, CollectionTarget, CyclePhase, PollConfig, PollSummary,
    WatchTargets, Watcher, WatcherConfig,
};

// ─── Test Helpers ───

const FEATURE_DB: &str = "feature-db";
const BOARD_DB: &str = "board-db";
const SCHEDULE_DB: &str = "schedule-db";
const FEATURE_CHANNEL: ChannelId = ChannelId(100);
const ALARM_CHANNEL: ChannelId = ChannelId(200);

type TestWatcher = Watcher<FakeSource, RecordingSink, RecordingSleeper>;

fn all_targets() -> WatchTargets {
    WatchTargets {
        features: Some(CollectionTarget::new(FEATURE_DB, FEATURE_CHANNEL)),
        boards: Some(CollectionTarget::new(BOARD_DB, ALARM_CHANNEL)),
        schedules: Some(CollectionTarget::new(SCHEDULE_DB, ALARM_CHANNEL)),
    }
}

fn config_with(targets: WatchTargets) -> WatcherConfig {
    WatcherConfig {
        targets,
        poll: PollConfig {
            retry: RetryConfig::NONE,
            ..PollConfig::new()
        },
        ..Default::default()
    }
}

fn fresh_watcher(path: &Path, targets: WatchTargets) -> TestWatcher {
    Watcher::new(
        FakeSource::new(),
        RecordingSink::new(),
        RecordingSleeper::default(),
        config_with(targets),
        StateStore::new(path),
    )
}

fn watcher_with(path: &Path, targets: WatchTargets, ledger: Ledger) -> TestWatcher {
    Watcher::with_ledger(
        FakeSource::new(),
        RecordingSink::new(),
        RecordingSleeper::default(),
        config_with(targets),
        StateStore::new(path),
        ledger,
    )
}

fn initialized_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    for kind in CollectionKind::ALL {
        ledger.get_mut(kind).initialized = true;
    }
    ledger
}

fn only_features() -> WatchTargets {
    WatchTargets {
        features: Some(CollectionTarget::new(FEATURE_DB, FEATURE_CHANNEL)),
        ..Default::default()
    }
}

fn ids(items: &[&str]) -> std::collections::BTreeSet<RowId> {
    items.iter().copied().map(RowId::from).collect()
}

fn polled(outcome: Option<&CollectionOutcome>) -> PollSummary {
    match outcome {
        Some(CollectionOutcome::Polled(summary)) => *summary,
        other => panic!("expected a regular poll, got {other:?}"),
    }
}

fn schedule_row(id: &str, tags: &[&str], start: Option<&str>) -> Row {
    Row::new(id)
        .with_property(
            "태그",
            PropertyValue::MultiSelect(tags.iter().map(|t| t.to_string()).collect()),
        )
        .with_property(
            "날짜",
            PropertyValue::Date(start.map(|s| DateRange::new(s, None))),
        )
}

// ─── Bootstrap ───

#[tokio::test]
async fn bootstrap_adopts_baseline_without_notifying() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut watcher = fresh_watcher(&path, all_targets());
    watcher.source().push_rows(
        FEATURE_DB,
        vec![
            feature_row("a", "todo", "검색", ""),
            feature_row("b", "완료", "알림", ""),
        ],
    );
    watcher.source().push_rows(BOARD_DB, vec![Row::new("b1")]);
    watcher.source().push_rows(SCHEDULE_DB, vec![Row::new("s1")]);

    let report = watcher.tick().await;

    assert_eq!(
        report.get(CollectionKind::Feature),
        Some(&CollectionOutcome::Bootstrapped { adopted: 2 })
    );
    assert_eq!(
        report.get(CollectionKind::Board),
        Some(&CollectionOutcome::Bootstrapped { adopted: 1 })
    );
    assert!(watcher.sink().sent().is_empty());
    assert!(watcher.sleeper().recorded().is_empty());

    let ledger = watcher.ledger();
    assert_eq!(ledger.features.seen_ids, ids(&["a", "b"]));
    assert_eq!(
        ledger.features.status_by_id.get(&RowId::from("b")).map(String::as_str),
        Some("완료")
    );
    assert!(CollectionKind::ALL.iter().all(|k| ledger.get(*k).initialized));

    let on_disk = StateStore::new(&path).load().unwrap();
    assert_eq!(&on_disk, ledger);
}

#[tokio::test]
async fn unchanged_collection_stays_silent() {
    let dir = tempdir().unwrap();
    let mut watcher = fresh_watcher(&dir.path().join("state.json"), only_features());
    watcher
        .source()
        .push_rows(FEATURE_DB, vec![feature_row("a", "완료", "검색", "")]);

    watcher.tick().await;
    let report = watcher.tick().await;

    assert_eq!(polled(report.get(CollectionKind::Feature)), PollSummary::default());
    assert!(watcher.sink().sent().is_empty());
}

#[tokio::test]
async fn collection_empty_at_bootstrap_alerts_on_first_row() {
    let dir = tempdir().unwrap();
    let mut watcher = fresh_watcher(&dir.path().join("state.json"), only_features());
    watcher.source().script(
        FEATURE_DB,
        [
            Scripted::Rows(vec![]),
            Scripted::Rows(vec![feature_row("a", "todo", "검색", "빠르게")]),
        ],
    );

    let first = watcher.tick().await;
    assert_eq!(
        first.get(CollectionKind::Feature),
        Some(&CollectionOutcome::Bootstrapped { adopted: 0 })
    );

    watcher.tick().await;

    assert_eq!(
        watcher.sink().sent_to(FEATURE_CHANNEL),
        vec!["기능 요청이 들어왔습니다 ✨\n- 검색 — 빠르게".to_string()]
    );
}

// ─── Feature collection ───

#[tokio::test]
async fn new_request_and_completion_edge_in_one_tick() {
    let dir = tempdir().unwrap();
    let mut ledger = initialized_ledger();
    ledger.features.seen_ids.insert(RowId::from("A"));
    ledger
        .features
        .status_by_id
        .insert(RowId::from("A"), "todo".to_string());
    let mut watcher = watcher_with(&dir.path().join("state.json"), only_features(), ledger);
    watcher.source().push_rows(
        FEATURE_DB,
        vec![
            feature_row("A", "완료", "다크 모드", "눈이 편하게"),
            feature_row("B", "todo", "검색", ""),
        ],
    );

    let report = watcher.tick().await;

    assert_eq!(
        watcher.sink().sent_to(FEATURE_CHANNEL),
        vec![
            "기능 요청이 들어왔습니다 ✨\n- 검색 — (설명 없음)".to_string(),
            "기능이 추가됐습니다 ✅\n- 다크 모드 — 눈이 편하게".to_string(),
        ]
    );
    assert_eq!(
        polled(report.get(CollectionKind::Feature)),
        PollSummary {
            new_rows: 1,
            completed: 1,
            settled: true,
            notifications_sent: 2,
            notifications_failed: 0,
        }
    );
    assert_eq!(watcher.sleeper().recorded(), vec![Duration::from_secs(20)]);

    let features = &watcher.ledger().features;
    assert_eq!(features.seen_ids, ids(&["A", "B"]));
    assert_eq!(
        features.status_by_id.get(&RowId::from("A")).map(String::as_str),
        Some("완료")
    );
    assert_eq!(
        features.status_by_id.get(&RowId::from("B")).map(String::as_str),
        Some("todo")
    );
}

#[tokio::test]
async fn new_row_already_complete_goes_to_completed_batch() {
    let dir = tempdir().unwrap();
    let mut watcher = watcher_with(
        &dir.path().join("state.json"),
        only_features(),
        initialized_ledger(),
    );
    watcher
        .source()
        .push_rows(FEATURE_DB, vec![feature_row("C", "Done", "내보내기", "")]);

    watcher.tick().await;

    assert_eq!(
        watcher.sink().sent_to(FEATURE_CHANNEL),
        vec!["기능이 추가됐습니다 ✅\n- 내보내기 — (설명 없음)".to_string()]
    );
}

#[tokio::test]
async fn row_created_without_status_announces_later_completion() {
    let dir = tempdir().unwrap();
    let mut watcher = watcher_with(
        &dir.path().join("state.json"),
        only_features(),
        initialized_ledger(),
    );
    let unlabeled = Row::new("B")
        .with_property("상태", PropertyValue::Status(None))
        .with_property("내용", PropertyValue::Title(vec!["검색".to_string()]));
    watcher.source().script(
        FEATURE_DB,
        [
            Scripted::Rows(vec![unlabeled.clone()]),
            Scripted::Rows(vec![unlabeled]),
            Scripted::Rows(vec![feature_row("B", "완료", "검색", "")]),
        ],
    );

    watcher.tick().await;
    let report = watcher.tick().await;

    assert_eq!(
        watcher.sink().sent_to(FEATURE_CHANNEL),
        vec![
            "기능 요청이 들어왔습니다 ✨\n- 검색 — (설명 없음)".to_string(),
            "기능이 추가됐습니다 ✅\n- 검색 — (설명 없음)".to_string(),
        ]
    );
    assert_eq!(polled(report.get(CollectionKind::Feature)).completed, 1);
    assert_eq!(
        watcher
            .ledger()
            .features
            .status_by_id
            .get(&RowId::from("B"))
            .map(String::as_str),
        Some("완료")
    );
}

#[tokio::test]
async fn settle_uses_refetched_content() {
    let dir = tempdir().unwrap();
    let mut watcher = watcher_with(
        &dir.path().join("state.json"),
        only_features(),
        initialized_ledger(),
    );
    watcher.source().script(
        FEATURE_DB,
        [
            Scripted::Rows(vec![feature_row("B", "todo", "", "")]),
            Scripted::Rows(vec![feature_row("B", "todo", "검색", "전체 문서")]),
        ],
    );

    watcher.tick().await;

    assert_eq!(watcher.source().calls_for(FEATURE_DB), 2);
    assert_eq!(
        watcher.sink().sent_to(FEATURE_CHANNEL),
        vec!["기능 요청이 들어왔습니다 ✨\n- 검색 — 전체 문서".to_string()]
    );
}

#[tokio::test]
async fn settle_refetch_failure_keeps_pre_settle_rows() {
    let dir = tempdir().unwrap();
    let mut watcher = watcher_with(
        &dir.path().join("state.json"),
        only_features(),
        initialized_ledger(),
    );
    watcher.source().script(
        FEATURE_DB,
        [
            Scripted::Rows(vec![feature_row("B", "todo", "초안", "")]),
            Scripted::Fail(500),
        ],
    );

    let report = watcher.tick().await;

    assert_eq!(
        watcher.sink().sent_to(FEATURE_CHANNEL),
        vec!["기능 요청이 들어왔습니다 ✨\n- 초안 — (설명 없음)".to_string()]
    );
    assert!(polled(report.get(CollectionKind::Feature)).settled);
    assert_eq!(watcher.ledger().features.seen_ids, ids(&["B"]));
}

#[tokio::test]
async fn row_appearing_during_settle_is_announced_next_tick() {
    let dir = tempdir().unwrap();
    let mut ledger = initialized_ledger();
    ledger.features.seen_ids.insert(RowId::from("A"));
    let mut watcher = watcher_with(&dir.path().join("state.json"), only_features(), ledger);
    watcher.source().script(
        FEATURE_DB,
        [
            Scripted::Rows(vec![feature_row("B", "todo", "둘", ""), feature_row("A", "todo", "하나", "")]),
            Scripted::Rows(vec![
                feature_row("C", "todo", "셋", ""),
                feature_row("B", "todo", "둘", ""),
                feature_row("A", "todo", "하나", ""),
            ]),
        ],
    );

    watcher.tick().await;
    assert_eq!(
        watcher.sink().sent_to(FEATURE_CHANNEL),
        vec!["기능 요청이 들어왔습니다 ✨\n- 둘 — (설명 없음)".to_string()]
    );
    assert_eq!(watcher.ledger().features.seen_ids, ids(&["A", "B"]));

    watcher.tick().await;
    assert_eq!(
        watcher.sink().sent_to(FEATURE_CHANNEL).last().map(String::as_str),
        Some("기능 요청이 들어왔습니다 ✨\n- 셋 — (설명 없음)")
    );
}

// ─── Board and schedule collections ───

#[tokio::test]
async fn board_posts_one_notice_without_settling() {
    let dir = tempdir().unwrap();
    let mut ledger = initialized_ledger();
    ledger.boards.seen_ids.insert(RowId::from("b0"));
    let targets = WatchTargets {
        boards: Some(CollectionTarget::new(BOARD_DB, ALARM_CHANNEL)),
        ..Default::default()
    };
    let mut watcher = watcher_with(&dir.path().join("state.json"), targets, ledger);
    watcher.source().push_rows(
        BOARD_DB,
        vec![Row::new("b2"), Row::new("b1"), Row::new("b0")],
    );

    let report = watcher.tick().await;

    assert_eq!(watcher.sink().sent_to(ALARM_CHANNEL), vec![BOARD_NOTICE.to_string()]);
    assert_eq!(polled(report.get(CollectionKind::Board)).new_rows, 2);
    assert!(watcher.sleeper().recorded().is_empty());
    assert_eq!(watcher.source().calls_for(BOARD_DB), 1);
}

#[tokio::test]
async fn schedule_lists_new_rows_with_tags_and_dates() {
    let dir = tempdir().unwrap();
    let mut ledger = initialized_ledger();
    ledger.schedules.seen_ids.insert(RowId::from("s0"));
    let targets = WatchTargets {
        schedules: Some(CollectionTarget::new(SCHEDULE_DB, ALARM_CHANNEL)),
        ..Default::default()
    };
    let mut watcher = watcher_with(&dir.path().join("state.json"), targets, ledger);
    watcher.source().push_rows(
        SCHEDULE_DB,
        vec![
            schedule_row("s2", &[], None),
            schedule_row("s1", &["회의", "전체"], Some("2024-06-01T09:00:00.000+09:00")),
            schedule_row("s0", &["지난 일정"], Some("2024-05-01")),
        ],
    );

    watcher.tick().await;

    assert_eq!(
        watcher.sink().sent_to(ALARM_CHANNEL),
        vec!["새 일정이 등록되었습니다 📅\n- (태그 없음)\n- 회의, 전체 — 2024-06-01 09:00".to_string()]
    );
    assert_eq!(watcher.sleeper().recorded(), vec![Duration::from_secs(20)]);
}

// ─── Failures ───

#[tokio::test]
async fn fetch_failure_leaves_state_untouched_and_others_continue() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut ledger = initialized_ledger();
    ledger.features.seen_ids.insert(RowId::from("A"));
    ledger
        .features
        .status_by_id
        .insert(RowId::from("A"), "todo".to_string());
    let before = ledger.features.clone();
    let mut watcher = watcher_with(&path, all_targets(), ledger);
    watcher.source().script(FEATURE_DB, [Scripted::Fail(503)]);
    watcher.source().push_rows(BOARD_DB, vec![Row::new("b1")]);
    watcher.source().push_rows(SCHEDULE_DB, vec![]);

    let report = watcher.tick().await;

    assert!(matches!(
        report.get(CollectionKind::Feature),
        Some(CollectionOutcome::SourceUnavailable { .. })
    ));
    assert_eq!(watcher.ledger().features, before);
    assert_eq!(watcher.sink().sent_to(ALARM_CHANNEL), vec![BOARD_NOTICE.to_string()]);
    assert_eq!(watcher.phase(CollectionKind::Feature), CyclePhase::Idle);

    let on_disk = StateStore::new(&path).load().unwrap();
    assert_eq!(on_disk.features, before);
    assert_eq!(on_disk.boards.seen_ids, ids(&["b1"]));
}

#[tokio::test]
async fn fetch_failure_during_bootstrap_does_not_initialize() {
    let dir = tempdir().unwrap();
    let mut watcher = fresh_watcher(&dir.path().join("state.json"), only_features());
    watcher.source().script(
        FEATURE_DB,
        [
            Scripted::Fail(502),
            Scripted::Rows(vec![feature_row("a", "todo", "검색", "")]),
        ],
    );

    watcher.tick().await;
    assert!(watcher.ledger().features.is_bootstrap());

    let report = watcher.tick().await;
    assert_eq!(
        report.get(CollectionKind::Feature),
        Some(&CollectionOutcome::Bootstrapped { adopted: 1 })
    );
    assert!(watcher.sink().sent().is_empty());
}

#[tokio::test]
async fn transient_fetch_errors_are_retried() {
    let dir = tempdir().unwrap();
    let mut config = config_with(only_features());
    config.poll.retry = RetryConfig::DEFAULT;
    let mut watcher = Watcher::new(
        FakeSource::new(),
        RecordingSink::new(),
        RecordingSleeper::default(),
        config,
        StateStore::new(dir.path().join("state.json")),
    );
    watcher.source().script(
        FEATURE_DB,
        [
            Scripted::Fail(503),
            Scripted::Rows(vec![feature_row("a", "todo", "검색", "")]),
        ],
    );

    let report = watcher.tick().await;

    assert_eq!(
        report.get(CollectionKind::Feature),
        Some(&CollectionOutcome::Bootstrapped { adopted: 1 })
    );
    assert_eq!(watcher.sleeper().recorded(), vec![Duration::from_secs(1)]);
}

#[tokio::test]
async fn sink_failure_still_commits_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut watcher = watcher_with(&path, only_features(), initialized_ledger());
    watcher.sink().fail_channel(FEATURE_CHANNEL);
    watcher
        .source()
        .push_rows(FEATURE_DB, vec![feature_row("B", "todo", "검색", "")]);

    let report = watcher.tick().await;
    let summary = polled(report.get(CollectionKind::Feature));
    assert_eq!(summary.notifications_failed, 1);
    assert_eq!(summary.notifications_sent, 0);

    let on_disk = StateStore::new(&path).load().unwrap();
    assert_eq!(on_disk.features.seen_ids, ids(&["B"]));

    // The dropped message is not retried.
    let report = watcher.tick().await;
    assert_eq!(polled(report.get(CollectionKind::Feature)), PollSummary::default());
}

#[tokio::test]
async fn stalled_sink_does_not_hold_up_the_tick() {
    let dir = tempdir().unwrap();
    let mut config = config_with(WatchTargets {
        features: Some(CollectionTarget::new(FEATURE_DB, FEATURE_CHANNEL)),
        boards: Some(CollectionTarget::new(BOARD_DB, ALARM_CHANNEL)),
        schedules: None,
    });
    config.poll.send_timeout = Duration::from_millis(50);
    let mut watcher = Watcher::with_ledger(
        FakeSource::new(),
        RecordingSink::new(),
        RecordingSleeper::default(),
        config,
        StateStore::new(dir.path().join("state.json")),
        initialized_ledger(),
    );
    watcher.sink().stall_channel(FEATURE_CHANNEL);
    watcher
        .source()
        .push_rows(FEATURE_DB, vec![feature_row("B", "todo", "검색", "")]);
    watcher.source().push_rows(BOARD_DB, vec![Row::new("b1")]);

    let report = tokio::time::timeout(Duration::from_secs(5), watcher.tick())
        .await
        .expect("tick should finish despite the stalled channel");

    let summary = polled(report.get(CollectionKind::Feature));
    assert_eq!(summary.notifications_failed, 1);
    assert_eq!(watcher.ledger().features.seen_ids, ids(&["B"]));
    assert_eq!(watcher.sink().sent_to(ALARM_CHANNEL), vec![BOARD_NOTICE.to_string()]);
}

#[tokio::test]
async fn unwritable_state_file_is_reported_but_polling_continues() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::create_dir(&path).unwrap();
    let mut watcher = watcher_with(&path, only_features(), initialized_ledger());
    watcher
        .source()
        .push_rows(FEATURE_DB, vec![feature_row("B", "todo", "검색", "")]);

    let report = watcher.tick().await;

    assert_eq!(report.persist_failures, 1);
    assert_eq!(watcher.ledger().features.seen_ids, ids(&["B"]));
    assert_eq!(watcher.sink().sent_to(FEATURE_CHANNEL).len(), 1);
}

// ─── Restart ───

#[tokio::test]
async fn restart_from_state_file_does_not_replay() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let rows = vec![
        feature_row("A", "완료", "다크 모드", ""),
        feature_row("B", "todo", "검색", ""),
    ];

    let mut first = fresh_watcher(&path, only_features());
    first.source().push_rows(FEATURE_DB, rows.clone());
    first.tick().await;
    first.tick().await;
    assert!(first.sink().sent().is_empty());

    let mut second = fresh_watcher(&path, only_features());
    second.source().push_rows(FEATURE_DB, rows);
    let report = second.tick().await;

    assert_eq!(polled(report.get(CollectionKind::Feature)), PollSummary::default());
    assert!(second.sink().sent().is_empty());
}

#[tokio::test]
async fn corrupt_state_file_restarts_quietly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut watcher = fresh_watcher(&path, only_features());
    watcher
        .source()
        .push_rows(FEATURE_DB, vec![feature_row("A", "완료", "다크 모드", "")]);
    let report = watcher.tick().await;

    assert!(dir.path().join("state.json.corrupt").exists());
    assert_eq!(
        report.get(CollectionKind::Feature),
        Some(&CollectionOutcome::Bootstrapped { adopted: 1 })
    );
    assert!(watcher.sink().sent().is_empty());
}

// ─── Wiring ───

#[tokio::test]
async fn unconfigured_collections_are_disabled() {
    let dir = tempdir().unwrap();
    let targets = WatchTargets {
        boards: Some(CollectionTarget::new(BOARD_DB, ALARM_CHANNEL)),
        ..Default::default()
    };
    let mut watcher = fresh_watcher(&dir.path().join("state.json"), targets);
    watcher.source().push_rows(BOARD_DB, vec![]);

    let report = watcher.tick().await;

    assert_eq!(report.get(CollectionKind::Feature), Some(&CollectionOutcome::Disabled));
    assert_eq!(report.get(CollectionKind::Schedule), Some(&CollectionOutcome::Disabled));
    assert_eq!(watcher.source().calls().len(), 1);
}

#[tokio::test]
async fn page_sizes_follow_the_collection() {
    let dir = tempdir().unwrap();
    let mut watcher = fresh_watcher(&dir.path().join("state.json"), all_targets());
    for db in [FEATURE_DB, BOARD_DB, SCHEDULE_DB] {
        watcher.source().push_rows(db, vec![]);
    }

    watcher.tick().await;

    let sizes: Vec<(String, u32)> = watcher
        .source()
        .calls()
        .into_iter()
        .map(|(collection, size)| (collection.as_str().to_string(), size))
        .collect();
    assert_eq!(
        sizes,
        vec![
            (FEATURE_DB.to_string(), 50),
            (BOARD_DB.to_string(), 20),
            (SCHEDULE_DB.to_string(), 20),
        ]
    );
    assert!(
        CollectionKind::ALL
            .iter()
            .all(|k| watcher.phase(*k) == CyclePhase::Idle)
    );
}

#[tokio::test]
async fn run_polls_until_cancelled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let targets = WatchTargets {
        boards: Some(CollectionTarget::new(BOARD_DB, ALARM_CHANNEL)),
        ..Default::default()
    };
    let watcher = fresh_watcher(&path, targets);
    watcher.source().push_rows(BOARD_DB, vec![Row::new("b1")]);

    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(watcher.run(shutdown.clone()));

    for _ in 0..200 {
        if path.exists() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("watcher did not stop")
        .unwrap();

    let on_disk = StateStore::new(&path).load().unwrap();
    assert_eq!(on_disk.boards.seen_ids, ids(&["b1"]));
}

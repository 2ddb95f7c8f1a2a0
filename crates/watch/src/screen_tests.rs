// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use yare::parameterized;

use strand_core::test_support::job_event;
use strand_core::{EventType, JobRecordBuilder, JobState};

use super::*;
use crate::test_fetchers::FakeJobFetcher;
use crate::ChannelEvent;

// ── ScreenOutput ────────────────────────────────────────────────────────────

#[test]
fn first_snapshot_is_emitted_whole() {
    let mut screen = ScreenOutput::new();
    assert_eq!(screen.push("hello\n"), "hello\n");
}

#[test]
fn appended_text_yields_only_the_suffix() {
    let mut screen = ScreenOutput::new();
    assert_eq!(screen.push("line1\n"), "line1\n");
    assert_eq!(screen.push("line1\nline2\n"), "line2\n");
    assert_eq!(screen.push("line1\nline2\nline3\n"), "line3\n");
}

#[test]
fn unchanged_snapshot_yields_empty_delta() {
    let mut screen = ScreenOutput::new();
    assert_eq!(screen.push("stable"), "stable");
    assert_eq!(screen.push("stable"), "");
}

#[parameterized(
    dropped_prefix = { "AAAABBBB", "BBBBCCCC", "CCCC" },
    single_char_overlap = { "xy", "yz", "z" },
    full_overlap = { "abc", "abc", "" },
    shrunk_snapshot = { "abc", "bc", "" },
)]
fn overlap_reconciliation(previous: &str, current: &str, expected_delta: &str) {
    let mut screen = ScreenOutput::new();
    screen.push(previous);
    assert_eq!(screen.push(current), expected_delta);
}

#[test]
fn missed_update_resolves_largest_overlap() {
    // Spec example: previous "AAAABBBB", current "BBBBCCCC" — the missed
    // update dropped the AAAA prefix; overlap k=4 recovers CCCC.
    let mut screen = ScreenOutput::new();
    screen.push("AAAABBBB");
    assert_eq!(screen.push("BBBBCCCC"), "CCCC");
    // previous was replaced by the full new snapshot
    assert_eq!(screen.push("BBBBCCCCDDDD"), "DDDD");
}

#[test]
fn no_overlap_emits_everything() {
    let mut screen = ScreenOutput::new();
    screen.push("hello");
    assert_eq!(screen.push("goodbye"), "goodbye");
    // reconstruction continues normally afterwards
    assert_eq!(screen.push("goodbye!"), "!");
}

#[test]
fn mangled_warning_fires_once_per_instance() {
    let mut screen = ScreenOutput::new();
    screen.push("hello");
    assert!(!screen.warned);

    // First non-overlapping snapshot trips the latch.
    assert_eq!(screen.push("goodbye"), "goodbye");
    assert!(screen.warned);

    // Further non-overlapping snapshots still stream but cannot re-warn:
    // the warn call is gated on the latch staying set.
    assert_eq!(screen.push("12345"), "12345");
    assert!(screen.warned);

    // A fresh instance gets its own warning budget.
    let fresh = ScreenOutput::new();
    assert!(!fresh.warned);
}

#[test]
fn multibyte_text_never_panics() {
    let mut screen = ScreenOutput::new();
    screen.push("héllo wörld");
    assert_eq!(screen.push("wörld över"), " över");
    screen.push("日本語テキスト");
    let _ = screen.push("全く別の出力");
}

proptest! {
    /// For gap-free appends the concatenated deltas equal the final output.
    #[test]
    fn gap_free_appends_reconstruct_exactly(chunks in proptest::collection::vec(".{0,20}", 1..12)) {
        let mut screen = ScreenOutput::new();
        let mut cumulative = String::new();
        let mut emitted = String::new();
        for chunk in &chunks {
            cumulative.push_str(chunk);
            emitted.push_str(&screen.push(&cumulative));
        }
        prop_assert_eq!(emitted, cumulative);
    }

    /// Even with arbitrary snapshots the reconstructor never panics and the
    /// last snapshot's tail is always emitted by the final push.
    #[test]
    fn arbitrary_snapshots_never_panic(snapshots in proptest::collection::vec(".{0,20}", 1..12)) {
        let mut screen = ScreenOutput::new();
        for snapshot in &snapshots {
            let delta = screen.push(snapshot);
            prop_assert!(snapshot.ends_with(&delta));
        }
    }
}

// ── OutputWatcher ───────────────────────────────────────────────────────────

fn record_with_output(state: JobState, output: Option<&str>) -> strand_core::JobRecord {
    let builder = JobRecordBuilder::default().job_id("job-1").state(state);
    match output {
        Some(text) => builder.screen_output(text).build(),
        None => builder.build(),
    }
}

fn watcher_for(
    rx: broadcast::Receiver<ChannelEvent>,
    fetcher: Arc<FakeJobFetcher>,
) -> OutputWatcher<Arc<FakeJobFetcher>> {
    OutputWatcher::new(rx, fetcher, "sess-1".into(), "job-1".into())
}

fn send_update(tx: &broadcast::Sender<ChannelEvent>, job_id: &str) {
    tx.send(ChannelEvent::Event(job_event(job_id, EventType::Update)))
        .unwrap();
}

#[tokio::test]
async fn streams_incremental_deltas() {
    let (tx, rx) = broadcast::channel(64);
    let fetcher = Arc::new(FakeJobFetcher::new());
    let mut watcher = watcher_for(rx, fetcher.clone());

    fetcher.push(record_with_output(JobState::Running, Some("a\n")));
    fetcher.push(record_with_output(JobState::Running, Some("a\nb\n")));
    send_update(&tx, "job-1");
    send_update(&tx, "job-1");

    assert_eq!(watcher.next().await.unwrap().unwrap(), "a\n");
    assert_eq!(watcher.next().await.unwrap().unwrap(), "b\n");
}

#[tokio::test]
async fn records_without_output_are_skipped() {
    let (tx, rx) = broadcast::channel(64);
    let fetcher = Arc::new(FakeJobFetcher::new());
    let mut watcher = watcher_for(rx, fetcher.clone());

    fetcher.push(record_with_output(JobState::Scheduled, None));
    fetcher.push(record_with_output(JobState::Running, Some("go\n")));
    send_update(&tx, "job-1");
    send_update(&tx, "job-1");

    assert_eq!(watcher.next().await.unwrap().unwrap(), "go\n");
}

#[tokio::test]
async fn terminal_failure_does_not_end_the_text_view() {
    let (tx, rx) = broadcast::channel(64);
    let fetcher = Arc::new(FakeJobFetcher::new());
    let mut watcher = watcher_for(rx, fetcher.clone());

    fetcher.push(record_with_output(JobState::Failed, Some("error: oom\n")));
    fetcher.push(record_with_output(JobState::Failed, Some("error: oom\nretry hint\n")));
    send_update(&tx, "job-1");
    send_update(&tx, "job-1");

    // Text still flows after a terminal state; only the caller stops it.
    assert_eq!(watcher.next().await.unwrap().unwrap(), "error: oom\n");
    assert_eq!(watcher.next().await.unwrap().unwrap(), "retry hint\n");
}

#[tokio::test]
async fn cancellation_ends_the_stream() {
    let (_tx, rx) = broadcast::channel::<ChannelEvent>(64);
    let cancel = CancellationToken::new();
    let mut watcher = watcher_for(rx, Arc::new(FakeJobFetcher::new()))
        .with_cancellation(cancel.clone());

    let handle = tokio::spawn(async move { watcher.next().await });
    tokio::time::sleep(Duration::from_millis(10)).await;
    cancel.cancel();
    assert!(handle.await.unwrap().is_none());
}

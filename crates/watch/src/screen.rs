// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Screen output reconstruction.
//!
//! The server never sends output increments — every job record carries the
//! full accumulated text so far. [`ScreenOutput`] turns those snapshots back
//! into an append-only delta stream, coping with missed intermediate
//! versions by overlap reconciliation: the longest suffix of what was
//! already emitted that is also a prefix of the new snapshot marks where the
//! new content starts.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use strand_core::{JobId, SessionId};

use crate::channel::ChannelEvent;
use crate::fetch::FetchJob;
use crate::tracker::FETCH_TIMEOUT;
use crate::WatchError;

/// Per-job delta reconstructor. Owns the `previous` snapshot and the
/// one-time mangled-output warning flag; construct one per watch and discard
/// it when the watch ends.
#[derive(Debug, Default)]
pub struct ScreenOutput {
    previous: String,
    warned: bool,
}

impl ScreenOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next full snapshot, returning the text not yet emitted.
    ///
    /// Best-effort under missed updates: when no overlap with the previous
    /// snapshot can be found the whole snapshot is returned and a warning is
    /// logged once for the lifetime of this reconstructor. Never panics,
    /// never re-emits and never drops text that was already returned.
    pub fn push(&mut self, current: &str) -> String {
        let delta = if let Some(suffix) = current.strip_prefix(self.previous.as_str()) {
            // Normal case: the server only ever appends.
            suffix.to_string()
        } else {
            let overlap = self.find_overlap(current);
            if overlap == 0 && !self.warned {
                self.warned = true;
                tracing::warn!("screen output mangled: no overlap with previously seen text");
            }
            current[overlap..].to_string()
        };
        self.previous = current.to_string();
        delta
    }

    /// Longest `k` (in bytes, on a char boundary) such that `previous` ends
    /// with `current[..k]`. Scans from the longest candidate down, so a
    /// repeated pattern resolves to the largest overlap.
    fn find_overlap(&self, current: &str) -> usize {
        for k in (0..=current.len()).rev() {
            if !current.is_char_boundary(k) {
                continue;
            }
            if self.previous.ends_with(&current[..k]) {
                return k;
            }
        }
        0
    }
}

/// Streams incremental output deltas for one job.
///
/// Same event filter and re-fetch as [`crate::JobTracker`], but purely a
/// text view: it does not end on terminal job states, only on cancellation
/// or loss of the channel. The caller cancels it once the tracker finishes.
pub struct OutputWatcher<F> {
    events: broadcast::Receiver<ChannelEvent>,
    fetcher: F,
    session_id: SessionId,
    job_id: JobId,
    cancel: CancellationToken,
    screen: ScreenOutput,
    done: bool,
}

impl<F: FetchJob> OutputWatcher<F> {
    pub fn new(
        events: broadcast::Receiver<ChannelEvent>,
        fetcher: F,
        session_id: SessionId,
        job_id: JobId,
    ) -> Self {
        Self {
            events,
            fetcher,
            session_id,
            job_id,
            cancel: CancellationToken::new(),
            screen: ScreenOutput::new(),
            done: false,
        }
    }

    /// Use an externally-owned cancellation token instead of the default
    /// internal one.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Next non-empty output delta.
    pub async fn next(&mut self) -> Option<Result<String, WatchError>> {
        if self.done {
            return None;
        }
        loop {
            let event = tokio::select! {
                _ = self.cancel.cancelled() => {
                    self.done = true;
                    return None;
                }
                recv = self.events.recv() => recv,
            };

            match event {
                Ok(ChannelEvent::Event(ev)) if ev.is_for_job(self.job_id.as_str()) => {}
                Ok(ChannelEvent::Event(_)) => continue,
                Ok(ChannelEvent::Closed) | Err(broadcast::error::RecvError::Closed) => {
                    self.done = true;
                    return Some(Err(WatchError::Closed));
                }
                Ok(ChannelEvent::Errored(reason)) => {
                    self.done = true;
                    return Some(Err(WatchError::Connection(reason)));
                }
                Ok(ChannelEvent::Malformed(reason)) => {
                    self.done = true;
                    return Some(Err(WatchError::Protocol(reason)));
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(job_id = %self.job_id, missed, "event stream lagged");
                    continue;
                }
            }

            let fetch = self.fetcher.fetch_job(&self.session_id, &self.job_id);
            let record = match tokio::time::timeout(FETCH_TIMEOUT, fetch).await {
                Ok(Ok(record)) => record,
                Ok(Err(e)) => {
                    self.done = true;
                    return Some(Err(WatchError::Fetch(e)));
                }
                Err(_) => {
                    self.done = true;
                    return Some(Err(WatchError::FetchTimeout));
                }
            };

            if self.cancel.is_cancelled() {
                self.done = true;
                return None;
            }

            // Records with no output yet are skipped, not treated as resets.
            let Some(current) = record.screen_output else {
                continue;
            };
            let delta = self.screen.push(&current);
            if delta.is_empty() {
                continue;
            }
            return Some(Ok(delta));
        }
    }
}

#[cfg(test)]
#[path = "screen_tests.rs"]
mod tests;

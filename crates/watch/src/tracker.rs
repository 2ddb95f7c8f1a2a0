// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job state tracker — a finite, non-restartable sequence of state
//! transitions for one job.
//!
//! Every qualifying event triggers an unconditional re-fetch of the full
//! job record. Fetches are serialized: the next event is not looked at until
//! the current fetch resolves, so fetch completion order can never race
//! event order within this view. Events missed while a fetch is in flight
//! cost nothing — the next fetch reads the whole record anyway.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use strand_core::{JobId, JobRecord, JobState, SessionId};

use crate::channel::ChannelEvent;
use crate::fetch::FetchJob;
use crate::WatchError;

/// Bound on each event-triggered fetch, so a stalled server cannot pin the
/// watch loop forever.
pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Tracks one job's lifecycle through the event stream.
///
/// [`JobTracker::next`] yields de-duplicated `(state, stateDetail)`
/// transitions. The sequence ends after the first terminal observation:
/// normally on success (final record delivered first), with
/// [`WatchError::JobFailed`] on failure. Once ended it stays ended.
pub struct JobTracker<F> {
    events: broadcast::Receiver<ChannelEvent>,
    fetcher: F,
    session_id: SessionId,
    job_id: JobId,
    cancel: CancellationToken,
    fetch_timeout: Duration,
    last: Option<(JobState, Option<String>)>,
    done: bool,
}

impl<F: FetchJob> JobTracker<F> {
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
            fetch_timeout: FETCH_TIMEOUT,
            last: None,
            done: false,
        }
    }

    /// Use an externally-owned cancellation token instead of the default
    /// internal one.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Token that cancels this tracker.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Next observed state transition.
    ///
    /// `None` means the sequence is over: terminal success already
    /// delivered, terminal failure already reported, or cancelled.
    pub async fn next(&mut self) -> Option<Result<JobRecord, WatchError>> {
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

            let job_event = match event {
                Ok(ChannelEvent::Event(ev)) => {
                    if !ev.is_for_job(self.job_id.as_str()) {
                        continue;
                    }
                    ev
                }
                Ok(ChannelEvent::Closed) => {
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
                    // Dropped events only delay the next re-fetch.
                    tracing::warn!(job_id = %self.job_id, missed, "event stream lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.done = true;
                    return Some(Err(WatchError::Closed));
                }
            };
            tracing::trace!(job_id = %self.job_id, event_type = ?job_event.event_type, "job event");

            let record = match self.fetch().await {
                Ok(record) => record,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            // A fetch that resolved after cancellation must not be delivered.
            if self.cancel.is_cancelled() {
                self.done = true;
                return None;
            }

            let key = (record.state.clone(), record.state_detail.clone());
            if self.last.as_ref() == Some(&key) {
                continue;
            }
            self.last = Some(key);

            if record.state.is_terminal_failure() {
                self.done = true;
                return Some(Err(WatchError::JobFailed {
                    state: record.state,
                    state_detail: record.state_detail,
                }));
            }
            if record.state.is_terminal_success() {
                self.done = true;
            }
            return Some(Ok(record));
        }
    }

    async fn fetch(&self) -> Result<JobRecord, WatchError> {
        let fetch = self.fetcher.fetch_job(&self.session_id, &self.job_id);
        match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(e)) => Err(WatchError::Fetch(e)),
            Err(_) => Err(WatchError::FetchTimeout),
        }
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;

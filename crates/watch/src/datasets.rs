// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output dataset filter.
//!
//! Dataset creation events carry no provenance, so this consumer listens
//! session-wide, fetches every newly created dataset, and forwards only
//! those whose `sourceJob` matches the watched job. It never ends on its
//! own; the caller cancels it when the job tracker finishes.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use strand_core::{Dataset, DatasetId, JobId, SessionId};

use crate::channel::ChannelEvent;
use crate::fetch::FetchDataset;
use crate::tracker::FETCH_TIMEOUT;
use crate::WatchError;

/// Streams datasets produced by one job, in creation-event order.
pub struct DatasetWatcher<F> {
    events: broadcast::Receiver<ChannelEvent>,
    fetcher: F,
    session_id: SessionId,
    job_id: JobId,
    cancel: CancellationToken,
    done: bool,
}

impl<F: FetchDataset> DatasetWatcher<F> {
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
            done: false,
        }
    }

    /// Use an externally-owned cancellation token instead of the default
    /// internal one.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Next dataset produced by the watched job.
    pub async fn next(&mut self) -> Option<Result<Dataset, WatchError>> {
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

            let dataset_id = match event {
                Ok(ChannelEvent::Event(ev)) if ev.is_dataset_creation() => {
                    DatasetId::new(ev.resource_id)
                }
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
            };

            let fetch = self.fetcher.fetch_dataset(&self.session_id, &dataset_id);
            let dataset = match tokio::time::timeout(FETCH_TIMEOUT, fetch).await {
                Ok(Ok(dataset)) => dataset,
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

            // Datasets from other jobs (or user uploads) are dropped.
            if !dataset.produced_by(&self.job_id) {
                continue;
            }
            return Some(Ok(dataset));
        }
    }
}

#[cfg(test)]
#[path = "datasets_tests.rs"]
mod tests;

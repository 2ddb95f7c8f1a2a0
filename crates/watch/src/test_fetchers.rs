// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted fetchers for watcher tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use strand_client::ClientError;
use strand_core::{Dataset, DatasetId, JobId, JobRecord, SessionId};

use crate::fetch::{FetchDataset, FetchJob};

/// Pops one scripted response per fetch, optionally after a delay.
#[derive(Default)]
pub(crate) struct FakeJobFetcher {
    responses: Mutex<VecDeque<Result<JobRecord, ClientError>>>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl FakeJobFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn push(&self, record: JobRecord) {
        self.responses.lock().unwrap().push_back(Ok(record));
    }

    pub(crate) fn push_error(&self, error: ClientError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FetchJob for FakeJobFetcher {
    async fn fetch_job(
        &self,
        _session: &SessionId,
        job: &JobId,
    ) -> Result<JobRecord, ClientError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ClientError::NotFound { kind: "job", id: job.to_string() })
        })
    }
}

/// Serves datasets from a fixed map.
#[derive(Default)]
pub(crate) struct FakeDatasetFetcher {
    datasets: Mutex<HashMap<DatasetId, Dataset>>,
}

impl FakeDatasetFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, dataset: Dataset) {
        self.datasets.lock().unwrap().insert(dataset.dataset_id.clone(), dataset);
    }
}

#[async_trait]
impl FetchDataset for FakeDatasetFetcher {
    async fn fetch_dataset(
        &self,
        _session: &SessionId,
        dataset: &DatasetId,
    ) -> Result<Dataset, ClientError> {
        self.datasets.lock().unwrap().get(dataset).cloned().ok_or_else(|| {
            ClientError::NotFound { kind: "dataset", id: dataset.to_string() }
        })
    }
}

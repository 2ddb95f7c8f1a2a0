// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fetch seams between the watch loops and the REST layer.
//!
//! The watchers only need point-in-time reads of single records, so they
//! depend on these two traits instead of the full client. Tests drive the
//! watchers with fakes; production wires in [`strand_client::RestClient`].

use async_trait::async_trait;

use strand_client::{ClientError, RestClient};
use strand_core::{Dataset, DatasetId, JobId, JobRecord, SessionId};

/// Point-in-time read of a job record.
#[async_trait]
pub trait FetchJob: Send + Sync {
    async fn fetch_job(
        &self,
        session: &SessionId,
        job: &JobId,
    ) -> Result<JobRecord, ClientError>;
}

/// Point-in-time read of a dataset record.
#[async_trait]
pub trait FetchDataset: Send + Sync {
    async fn fetch_dataset(
        &self,
        session: &SessionId,
        dataset: &DatasetId,
    ) -> Result<Dataset, ClientError>;
}

#[async_trait]
impl<T: FetchJob + ?Sized> FetchJob for std::sync::Arc<T> {
    async fn fetch_job(
        &self,
        session: &SessionId,
        job: &JobId,
    ) -> Result<JobRecord, ClientError> {
        (**self).fetch_job(session, job).await
    }
}

#[async_trait]
impl<T: FetchDataset + ?Sized> FetchDataset for std::sync::Arc<T> {
    async fn fetch_dataset(
        &self,
        session: &SessionId,
        dataset: &DatasetId,
    ) -> Result<Dataset, ClientError> {
        (**self).fetch_dataset(session, dataset).await
    }
}

#[async_trait]
impl FetchJob for RestClient {
    async fn fetch_job(
        &self,
        session: &SessionId,
        job: &JobId,
    ) -> Result<JobRecord, ClientError> {
        self.get_job(session, job).await
    }
}

#[async_trait]
impl FetchDataset for RestClient {
    async fn fetch_dataset(
        &self,
        session: &SessionId,
        dataset: &DatasetId,
    ) -> Result<Dataset, ClientError> {
        self.get_dataset(session, dataset).await
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed REST wrappers over the platform services.
//!
//! Every method is a single request/response round-trip; nothing here caches
//! or retries. Authentication is HTTP basic with the literal username
//! `token` and the stored token as the password, except `login` which sends
//! the real username/password pair to the auth service.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use strand_core::{Dataset, DatasetId, JobId, JobRecord, Session, SessionId};

use crate::{ClientError, Config};

/// Username sent with token-authenticated REST calls.
const TOKEN_USER: &str = "token";

/// Bound on any single REST round-trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    token_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionCreated {
    session_id: SessionId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetCreated {
    dataset_id: DatasetId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobCreated {
    job_id: JobId,
}

/// HTTP client for the session database and auth services.
pub struct RestClient {
    http: reqwest::Client,
    config: Config,
}

impl RestClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn base(&self) -> &str {
        self.config.server_url.trim_end_matches('/')
    }

    fn token(&self) -> Result<&str, ClientError> {
        self.config.require_token()
    }

    /// Check a response status, turning non-success into typed errors.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ClientError::Auth(if message.is_empty() {
                "token rejected".to_string()
            } else {
                message
            }));
        }
        Err(ClientError::Api { status: status.as_u16(), message })
    }

    /// Map a 404 onto a typed not-found error for `kind`/`id`.
    fn not_found(err: ClientError, kind: &'static str, id: &str) -> ClientError {
        match err {
            ClientError::Api { status: 404, .. } => {
                ClientError::NotFound { kind, id: id.to_string() }
            }
            other => other,
        }
    }

    // ── Auth ────────────────────────────────────────────────────────────────

    /// Exchange username/password for an auth token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let url = format!("{}/tokens", self.config.auth_base().trim_end_matches('/'));
        let resp = self
            .http
            .post(&url)
            .basic_auth(username, Some(password))
            .send()
            .await?;
        let token: TokenResponse = Self::check(resp).await?.json().await?;
        tracing::debug!(%username, "login ok");
        Ok(token.token_key)
    }

    // ── Sessions ────────────────────────────────────────────────────────────

    pub async fn list_sessions(&self) -> Result<Vec<Session>, ClientError> {
        let url = format!("{}/sessions", self.base());
        let resp = self.get(&url).await?;
        Ok(resp.json().await?)
    }

    pub async fn get_session(&self, id: &SessionId) -> Result<Session, ClientError> {
        let url = format!("{}/sessions/{}", self.base(), id);
        let resp = self.get(&url).await.map_err(|e| Self::not_found(e, "session", id.as_str()))?;
        Ok(resp.json().await?)
    }

    pub async fn create_session(&self, name: &str) -> Result<SessionId, ClientError> {
        let url = format!("{}/sessions", self.base());
        let body = serde_json::json!({ "name": name });
        let resp = self
            .http
            .post(&url)
            .basic_auth(TOKEN_USER, Some(self.token()?))
            .json(&body)
            .send()
            .await?;
        let created: SessionCreated = Self::check(resp).await?.json().await?;
        Ok(created.session_id)
    }

    pub async fn delete_session(&self, id: &SessionId) -> Result<(), ClientError> {
        let url = format!("{}/sessions/{}", self.base(), id);
        self.delete(&url).await.map_err(|e| Self::not_found(e, "session", id.as_str()))?;
        Ok(())
    }

    // ── Datasets ────────────────────────────────────────────────────────────

    pub async fn list_datasets(&self, session: &SessionId) -> Result<Vec<Dataset>, ClientError> {
        let url = format!("{}/sessions/{}/datasets", self.base(), session);
        let resp = self.get(&url).await?;
        Ok(resp.json().await?)
    }

    pub async fn get_dataset(
        &self,
        session: &SessionId,
        id: &DatasetId,
    ) -> Result<Dataset, ClientError> {
        let url = format!("{}/sessions/{}/datasets/{}", self.base(), session, id);
        let resp = self.get(&url).await.map_err(|e| Self::not_found(e, "dataset", id.as_str()))?;
        Ok(resp.json().await?)
    }

    pub async fn delete_dataset(
        &self,
        session: &SessionId,
        id: &DatasetId,
    ) -> Result<(), ClientError> {
        let url = format!("{}/sessions/{}/datasets/{}", self.base(), session, id);
        self.delete(&url).await.map_err(|e| Self::not_found(e, "dataset", id.as_str()))?;
        Ok(())
    }

    /// Create a dataset entry and upload a local file as its content.
    pub async fn upload_dataset(
        &self,
        session: &SessionId,
        path: &Path,
    ) -> Result<DatasetId, ClientError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        let url = format!("{}/sessions/{}/datasets", self.base(), session);
        let body = serde_json::json!({ "name": name });
        let resp = self
            .http
            .post(&url)
            .basic_auth(TOKEN_USER, Some(self.token()?))
            .json(&body)
            .send()
            .await?;
        let created: DatasetCreated = Self::check(resp).await?.json().await?;

        let file = tokio::fs::File::open(path).await?;
        let len = file.metadata().await?.len();
        let url = format!(
            "{}/sessions/{}/datasets/{}/file",
            self.base(),
            session,
            created.dataset_id
        );
        let resp = self
            .http
            .put(&url)
            .basic_auth(TOKEN_USER, Some(self.token()?))
            .header(reqwest::header::CONTENT_LENGTH, len)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await?;
        Self::check(resp).await?;
        tracing::debug!(dataset_id = %created.dataset_id, %len, "upload complete");
        Ok(created.dataset_id)
    }

    /// Stream a dataset's file content to a local path.
    pub async fn download_dataset(
        &self,
        session: &SessionId,
        id: &DatasetId,
        dest: &Path,
    ) -> Result<u64, ClientError> {
        let url = format!("{}/sessions/{}/datasets/{}/file", self.base(), session, id);
        let resp = self.get(&url).await.map_err(|e| Self::not_found(e, "dataset", id.as_str()))?;

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = resp.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }

    // ── Jobs ────────────────────────────────────────────────────────────────

    pub async fn list_jobs(&self, session: &SessionId) -> Result<Vec<JobRecord>, ClientError> {
        let url = format!("{}/sessions/{}/jobs", self.base(), session);
        let resp = self.get(&url).await?;
        Ok(resp.json().await?)
    }

    pub async fn get_job(
        &self,
        session: &SessionId,
        id: &JobId,
    ) -> Result<JobRecord, ClientError> {
        let url = format!("{}/sessions/{}/jobs/{}", self.base(), session, id);
        let resp = self.get(&url).await.map_err(|e| Self::not_found(e, "job", id.as_str()))?;
        Ok(resp.json().await?)
    }

    /// Submit a new job running `tool_id` over the given input datasets.
    pub async fn submit_job(
        &self,
        session: &SessionId,
        tool_id: &str,
        inputs: &[DatasetId],
    ) -> Result<JobId, ClientError> {
        let url = format!("{}/sessions/{}/jobs", self.base(), session);
        let body = serde_json::json!({
            "toolId": tool_id,
            "state": "NEW",
            "inputs": inputs
                .iter()
                .map(|d| serde_json::json!({ "datasetId": d }))
                .collect::<Vec<_>>(),
        });
        let resp = self
            .http
            .post(&url)
            .basic_auth(TOKEN_USER, Some(self.token()?))
            .json(&body)
            .send()
            .await?;
        let created: JobCreated = Self::check(resp).await?.json().await?;
        tracing::info!(job_id = %created.job_id, %tool_id, "job submitted");
        Ok(created.job_id)
    }

    /// Request cancellation of a running job.
    pub async fn cancel_job(&self, session: &SessionId, id: &JobId) -> Result<(), ClientError> {
        let url = format!("{}/sessions/{}/jobs/{}", self.base(), session, id);
        self.delete(&url).await.map_err(|e| Self::not_found(e, "job", id.as_str()))?;
        Ok(())
    }

    // ── Shared verbs ────────────────────────────────────────────────────────

    async fn get(&self, url: &str) -> Result<reqwest::Response, ClientError> {
        let resp = self
            .http
            .get(url)
            .basic_auth(TOKEN_USER, Some(self.token()?))
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn delete(&self, url: &str) -> Result<reqwest::Response, ClientError> {
        let resp = self
            .http
            .delete(url)
            .basic_auth(TOKEN_USER, Some(self.token()?))
            .send()
            .await?;
        Self::check(resp).await
    }
}

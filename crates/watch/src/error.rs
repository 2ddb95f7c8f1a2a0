// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch-side error type.
//!
//! Job failure is an expected outcome of running a job and gets its own
//! variant so callers can tell it apart from protocol and transport
//! problems.

use strand_client::ClientError;
use strand_core::JobState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    /// Could not connect, or the connection died mid-stream.
    #[error("event stream connection failed: {0}")]
    Connection(String),

    /// A frame arrived that is not a valid event. Fatal for the connection.
    #[error("event stream protocol error: {0}")]
    Protocol(String),

    /// The server closed the stream cleanly.
    #[error("event stream closed by server")]
    Closed,

    /// An event-triggered REST fetch failed.
    #[error("fetch failed: {0}")]
    Fetch(#[source] ClientError),

    /// An event-triggered REST fetch exceeded the fetch timeout.
    #[error("fetch timed out")]
    FetchTimeout,

    /// The watched job ended in a failure state.
    #[error("job failed: {state}{}", format_detail(.state_detail))]
    JobFailed {
        state: JobState,
        state_detail: Option<String>,
    },
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(" ({d})"),
        _ => String::new(),
    }
}

impl WatchError {
    /// True for errors that mean the underlying connection is gone.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(
            self,
            WatchError::Connection(_) | WatchError::Protocol(_) | WatchError::Closed
        )
    }
}

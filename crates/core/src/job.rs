// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job record and state classification.

use serde::{Deserialize, Serialize};

use crate::id::JobId;

/// Lifecycle state of a remote job.
///
/// Serializes to the platform's SCREAMING_SNAKE_CASE wire strings. States the
/// client does not know about deserialize to `Other` so a newer server never
/// breaks the watch loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    New,
    Scheduled,
    Waiting,
    Running,
    Completed,
    Failed,
    FailedUserError,
    Error,
    Cancelled,
    Timeout,
    ExpiredWaiting,
    /// Unrecognized state string, treated as non-terminal.
    Other(String),
}

impl JobState {
    /// Wire representation of the state.
    pub fn as_str(&self) -> &str {
        match self {
            JobState::New => "NEW",
            JobState::Scheduled => "SCHEDULED",
            JobState::Waiting => "WAITING",
            JobState::Running => "RUNNING",
            JobState::Completed => "COMPLETED",
            JobState::Failed => "FAILED",
            JobState::FailedUserError => "FAILED_USER_ERROR",
            JobState::Error => "ERROR",
            JobState::Cancelled => "CANCELLED",
            JobState::Timeout => "TIMEOUT",
            JobState::ExpiredWaiting => "EXPIRED_WAITING",
            JobState::Other(s) => s,
        }
    }

    /// Check if the job ended without producing a result.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            JobState::Failed
                | JobState::FailedUserError
                | JobState::Error
                | JobState::Cancelled
                | JobState::Timeout
                | JobState::ExpiredWaiting
        )
    }

    /// Check if the job finished successfully.
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, JobState::Completed)
    }

    /// Check if the job is in a terminal state (success or failure family).
    pub fn is_terminal(&self) -> bool {
        self.is_terminal_success() || self.is_terminal_failure()
    }
}

impl Default for JobState {
    fn default() -> Self {
        JobState::New
    }
}

impl From<String> for JobState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NEW" => JobState::New,
            "SCHEDULED" => JobState::Scheduled,
            "WAITING" => JobState::Waiting,
            "RUNNING" => JobState::Running,
            "COMPLETED" => JobState::Completed,
            "FAILED" => JobState::Failed,
            "FAILED_USER_ERROR" => JobState::FailedUserError,
            "ERROR" => JobState::Error,
            "CANCELLED" => JobState::Cancelled,
            "TIMEOUT" => JobState::Timeout,
            "EXPIRED_WAITING" => JobState::ExpiredWaiting,
            _ => JobState::Other(s),
        }
    }
}

impl From<JobState> for String {
    fn from(s: JobState) -> Self {
        s.as_str().to_string()
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter passed to the tool a job runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub parameter_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Full current state of a job, always fetched fresh from the session
/// database and replaced whole, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub job_id: JobId,
    #[serde(default)]
    pub tool_id: String,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub state: JobState,
    /// Human-readable elaboration of `state` (e.g. current tool phase).
    #[serde(default)]
    pub state_detail: Option<String>,
    /// Cumulative tool output so far. The server always sends the full
    /// accumulated text, not an increment.
    #[serde(default)]
    pub screen_output: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl JobRecord {
    /// The `(state, stateDetail)` pair used for transition de-duplication.
    pub fn transition_key(&self) -> (&JobState, Option<&str>) {
        (&self.state, self.state_detail.as_deref())
    }
}

crate::builder! {
    pub struct JobRecordBuilder => JobRecord {
        into {
            job_id: JobId = "job-1",
            tool_id: String = "test-tool",
        }
        set {
            state: JobState = JobState::New,
            parameters: Vec<Parameter> = Vec::new(),
        }
        option {
            tool_name: String = None,
            state_detail: String = None,
            screen_output: String = None,
            created: String = None,
            start_time: String = None,
            end_time: String = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;

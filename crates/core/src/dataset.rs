// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dataset record.

use serde::{Deserialize, Serialize};

use crate::id::{DatasetId, JobId};

/// Upload state of a dataset's file content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileState {
    Uploading,
    Complete,
    Other(String),
}

impl From<String> for FileState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "UPLOADING" => FileState::Uploading,
            "COMPLETE" => FileState::Complete,
            _ => FileState::Other(s),
        }
    }
}

impl From<FileState> for String {
    fn from(s: FileState) -> Self {
        match s {
            FileState::Uploading => "UPLOADING".to_string(),
            FileState::Complete => "COMPLETE".to_string(),
            FileState::Other(s) => s,
        }
    }
}

/// A file stored in a session, possibly produced by a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub dataset_id: DatasetId,
    #[serde(default)]
    pub name: String,
    /// The job that produced this dataset, if any. A dataset is owned by at
    /// most one job.
    #[serde(default)]
    pub source_job: Option<JobId>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub file_state: Option<FileState>,
    #[serde(default)]
    pub created: Option<String>,
}

impl Dataset {
    /// True when this dataset was produced by the given job.
    pub fn produced_by(&self, job_id: &JobId) -> bool {
        self.source_job.as_ref() == Some(job_id)
    }
}

crate::builder! {
    pub struct DatasetBuilder => Dataset {
        into {
            dataset_id: DatasetId = "ds-1",
            name: String = "output.tsv",
        }
        option {
            source_job: JobId = None,
            size: u64 = None,
            file_state: FileState = None,
            created: String = None,
        }
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{EventType, JobEvent, ResourceType};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core types.
pub mod strategies {
    use crate::JobState;
    use proptest::prelude::*;

    pub fn arb_job_state() -> impl Strategy<Value = JobState> {
        prop_oneof![
            Just(JobState::New),
            Just(JobState::Scheduled),
            Just(JobState::Waiting),
            Just(JobState::Running),
            Just(JobState::Completed),
            Just(JobState::Failed),
            Just(JobState::FailedUserError),
            Just(JobState::Error),
            Just(JobState::Cancelled),
            Just(JobState::Timeout),
            Just(JobState::ExpiredWaiting),
            "[A-Z_]{3,16}".prop_map(JobState::Other),
        ]
    }
}

// ── Event factory functions ─────────────────────────────────────────────────

pub fn job_event(job_id: &str, event_type: EventType) -> JobEvent {
    JobEvent {
        resource_type: ResourceType::Job,
        resource_id: job_id.to_string(),
        event_type,
    }
}

pub fn dataset_event(dataset_id: &str, event_type: EventType) -> JobEvent {
    JobEvent {
        resource_type: ResourceType::Dataset,
        resource_id: dataset_id.to_string(),
        event_type,
    }
}

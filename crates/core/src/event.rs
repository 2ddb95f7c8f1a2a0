// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server-pushed resource change events.
//!
//! One multiplexed channel per session announces every job and dataset
//! change as a `{resourceType, resourceId, type}` JSON object. Events are
//! transient notifications only; the full record is always re-fetched over
//! REST, so a lost or duplicated event costs nothing but latency.

use serde::{Deserialize, Serialize};

/// Kind of resource an event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    Job,
    Dataset,
    Session,
    /// Unrecognized resource kind; ignored by all consumers.
    Other(String),
}

impl From<String> for ResourceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "JOB" => ResourceType::Job,
            "DATASET" => ResourceType::Dataset,
            "SESSION" => ResourceType::Session,
            _ => ResourceType::Other(s),
        }
    }
}

impl From<ResourceType> for String {
    fn from(t: ResourceType) -> Self {
        match t {
            ResourceType::Job => "JOB".to_string(),
            ResourceType::Dataset => "DATASET".to_string(),
            ResourceType::Session => "SESSION".to_string(),
            ResourceType::Other(s) => s,
        }
    }
}

/// What happened to the resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Create,
    Update,
    Delete,
    /// Unrecognized event kind; ignored by all consumers.
    Other(String),
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CREATE" => EventType::Create,
            "UPDATE" => EventType::Update,
            "DELETE" => EventType::Delete,
            _ => EventType::Other(s),
        }
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        match t {
            EventType::Create => "CREATE".to_string(),
            EventType::Update => "UPDATE".to_string(),
            EventType::Delete => "DELETE".to_string(),
            EventType::Other(s) => s,
        }
    }
}

/// A single push notification from the session event stream.
///
/// Ordering across distinct resource ids is not guaranteed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEvent {
    pub resource_type: ResourceType,
    pub resource_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
}

impl JobEvent {
    /// True when this event is about the given job.
    pub fn is_for_job(&self, job_id: &str) -> bool {
        self.resource_type == ResourceType::Job && self.resource_id == job_id
    }

    /// True when this event announces a newly created dataset.
    pub fn is_dataset_creation(&self) -> bool {
        self.resource_type == ResourceType::Dataset && self.event_type == EventType::Create
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

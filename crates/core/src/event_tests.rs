// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn event_from_wire_json() {
    let json = r#"{"resourceType": "JOB", "resourceId": "job-1", "type": "UPDATE"}"#;
    let event: JobEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.resource_type, ResourceType::Job);
    assert_eq!(event.resource_id, "job-1");
    assert_eq!(event.event_type, EventType::Update);
}

#[test]
fn unknown_kinds_do_not_fail_parsing() {
    let json = r#"{"resourceType": "RULE", "resourceId": "r-1", "type": "GRANT"}"#;
    let event: JobEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.resource_type, ResourceType::Other("RULE".to_string()));
    assert_eq!(event.event_type, EventType::Other("GRANT".to_string()));
}

#[test]
fn is_for_job_matches_type_and_id() {
    let event = JobEvent {
        resource_type: ResourceType::Job,
        resource_id: "job-1".to_string(),
        event_type: EventType::Update,
    };
    assert!(event.is_for_job("job-1"));
    assert!(!event.is_for_job("job-2"));

    let dataset_event = JobEvent { resource_type: ResourceType::Dataset, ..event };
    assert!(!dataset_event.is_for_job("job-1"));
}

#[test]
fn is_dataset_creation_requires_create() {
    let create = JobEvent {
        resource_type: ResourceType::Dataset,
        resource_id: "ds-1".to_string(),
        event_type: EventType::Create,
    };
    assert!(create.is_dataset_creation());

    let update = JobEvent { event_type: EventType::Update, ..create.clone() };
    assert!(!update.is_dataset_creation());

    let job = JobEvent { resource_type: ResourceType::Job, ..create };
    assert!(!job.is_dataset_creation());
}

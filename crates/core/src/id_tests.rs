// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn job_id_display() {
    let id = JobId::new("job-abc123");
    assert_eq!(id.to_string(), "job-abc123");
}

#[test]
fn job_id_equality() {
    let id1 = JobId::new("j-1");
    let id2 = JobId::new("j-1");
    let id3 = JobId::new("j-2");

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
}

#[test]
fn job_id_from_str() {
    let id: JobId = "abc".into();
    assert_eq!(id.as_str(), "abc");
    assert_eq!(id, "abc");
}

#[test]
fn job_id_serde_transparent() {
    let id = SessionId::new("sess-9");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"sess-9\"");

    let parsed: SessionId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn empty_id() {
    let id = JobId::default();
    assert!(id.is_empty());
    assert!(!JobId::new("x").is_empty());
}

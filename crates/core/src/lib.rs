// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! strand-core: Resource types for the strand CLI client.
//!
//! Mirrors the platform's REST and push-event wire shapes: sessions,
//! datasets, jobs, and the events that announce changes to them.

pub mod macros;

pub mod dataset;
pub mod event;
pub mod id;
pub mod job;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(any(test, feature = "test-support"))]
pub use dataset::DatasetBuilder;
pub use dataset::{Dataset, FileState};
pub use event::{EventType, JobEvent, ResourceType};
pub use id::{DatasetId, JobId, SessionId};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobRecordBuilder;
pub use job::{JobRecord, JobState, Parameter};
pub use session::Session;

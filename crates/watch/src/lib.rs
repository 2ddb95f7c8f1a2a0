// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! strand-watch: live job/dataset event reconciliation.
//!
//! One WebSocket connection per watched session carries every job and
//! dataset change event. Three independent consumers derive their own views
//! from it, each re-fetching full records over REST on every event:
//!
//! - [`JobTracker`] — de-duplicated job state transitions, terminal detection
//! - [`OutputWatcher`] — incremental screen output deltas
//! - [`DatasetWatcher`] — datasets produced by the watched job
//!
//! The server may drop, duplicate, or reorder events; every view tolerates
//! that because events only say "something changed" and the record itself is
//! always read fresh from the source of truth.

mod channel;
mod datasets;
mod error;
mod fetch;
mod screen;
mod tracker;

pub use channel::{ChannelEvent, EventChannel};
pub use datasets::DatasetWatcher;
pub use error::WatchError;
pub use fetch::{FetchDataset, FetchJob};
pub use screen::{OutputWatcher, ScreenOutput};
pub use tracker::JobTracker;

#[cfg(test)]
mod test_fetchers;

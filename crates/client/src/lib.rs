// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! strand-client: REST access to the analysis platform.
//!
//! Thin request/response wrappers over the platform's HTTP services plus the
//! local configuration file that stores the server address and auth token.

mod config;
mod error;
mod rest;

pub use config::Config;
pub use error::ClientError;
pub use rest::RestClient;

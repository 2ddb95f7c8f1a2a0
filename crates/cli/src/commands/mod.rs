// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod dataset;
mod follow;
pub mod job;
pub mod login;
pub mod run;
pub mod session;

use anyhow::Result;

use strand_client::{Config, RestClient};
use strand_core::SessionId;

use crate::exit_error::ExitError;

/// Build a REST client from the stored configuration.
pub(crate) fn client() -> Result<RestClient> {
    let config = Config::load()?;
    if config.server_url.is_empty() {
        return Err(ExitError::usage(
            "no server configured: run `strand login --url <server>` or set STRAND_SERVER_URL",
        )
        .into());
    }
    Ok(RestClient::new(config)?)
}

/// Resolve the session to operate on: `--session` flag, then the
/// STRAND_SESSION environment variable.
pub(crate) fn resolve_session(arg: Option<&str>) -> Result<SessionId> {
    if let Some(s) = arg {
        return Ok(SessionId::from(s));
    }
    match std::env::var("STRAND_SESSION") {
        Ok(s) if !s.is_empty() => Ok(SessionId::from(s.as_str())),
        _ => Err(ExitError::usage(
            "no session selected: pass --session <id> or set STRAND_SESSION",
        )
        .into()),
    }
}

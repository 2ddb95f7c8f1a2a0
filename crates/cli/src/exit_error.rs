// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process exit codes for failed commands.
//!
//! Commands return `ExitError` through `anyhow` rather than calling
//! `std::process::exit` themselves; `main` downcasts it back out and
//! terminates with the carried code.

use std::fmt;

/// The followed job reached a terminal failure state.
const CODE_JOB_FAILURE: i32 = 1;
/// The command was invoked without required context (server, session).
const CODE_USAGE: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// A followed job ended in a failure state.
    pub fn job_failure(message: impl Into<String>) -> Self {
        Self::new(CODE_JOB_FAILURE, message)
    }

    /// Missing configuration or selection the command cannot proceed without.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(CODE_USAGE, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;

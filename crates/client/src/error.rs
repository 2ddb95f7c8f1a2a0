// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side error type for REST calls and configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, TLS, timeout).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Missing or rejected credentials.
    #[error("not authenticated: {0}")]
    Auth(String),

    /// The requested resource does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Bad or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Local file I/O during upload/download.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

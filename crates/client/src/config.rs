// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local configuration: server addresses and the auth token.
//!
//! Stored as TOML under the user config directory
//! (`~/.config/strand/config.toml` on Linux). Environment variables
//! `STRAND_SERVER_URL` and `STRAND_TOKEN` override the file, which keeps
//! scripted use free of on-disk state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Persisted client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the session database service.
    pub server_url: String,
    /// Base URL of the push-event service. Defaults to `server_url` with a
    /// `ws`/`wss` scheme when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_url: Option<String>,
    /// Base URL of the authentication service. Defaults to `server_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Config {
    /// Load configuration from the default path, applying env overrides.
    pub fn load() -> Result<Self, ClientError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Config::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ClientError> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write configuration to the default path, creating parent directories.
    pub fn save(&self) -> Result<PathBuf, ClientError> {
        let path = Self::default_path()
            .ok_or_else(|| ClientError::Config("no config directory available".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write configuration to an explicit file.
    pub fn save_to(&self, path: &Path) -> Result<(), ClientError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)
            .map_err(|e| ClientError::Config(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Default config file location (`<config-dir>/strand/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("strand").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("STRAND_SERVER_URL") {
            if !url.is_empty() {
                self.server_url = url;
            }
        }
        if let Ok(token) = std::env::var("STRAND_TOKEN") {
            if !token.is_empty() {
                self.token = Some(token);
            }
        }
    }

    /// The auth token, or an `Auth` error telling the user to log in.
    pub fn require_token(&self) -> Result<&str, ClientError> {
        self.token
            .as_deref()
            .ok_or_else(|| ClientError::Auth("no token stored, run `strand login`".to_string()))
    }

    /// Base URL for the event stream, derived from `server_url` when not set
    /// explicitly: `http` becomes `ws`, `https` becomes `wss`.
    pub fn events_base(&self) -> String {
        match &self.events_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let base = self.server_url.trim_end_matches('/');
                if let Some(rest) = base.strip_prefix("https://") {
                    format!("wss://{rest}")
                } else if let Some(rest) = base.strip_prefix("http://") {
                    format!("ws://{rest}")
                } else {
                    base.to_string()
                }
            }
        }
    }

    /// Base URL for the auth service, defaulting to the session database.
    pub fn auth_base(&self) -> &str {
        self.auth_url.as_deref().unwrap_or(&self.server_url)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

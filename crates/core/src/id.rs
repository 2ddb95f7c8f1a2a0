// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource identifier newtypes.
//!
//! The platform assigns every id server-side; the client only carries them
//! around, so these are thin wrappers over the wire strings.

/// Define a newtype ID wrapper around `SmolStr` for a server-assigned id.
///
/// Generates `new()` for wrapping an existing string, `as_str()`,
/// `Display`, `From<String>`, `From<&str>`, `PartialEq<str>`, and
/// `PartialEq<&str>` implementations.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            /// Wrap an id received from the server.
            pub fn new(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the ID is an empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id! {
    /// Identifier of a remote session (a workspace of datasets and jobs).
    pub struct SessionId;
}

define_id! {
    /// Identifier of an analysis job within a session.
    pub struct JobId;
}

define_id! {
    /// Identifier of a dataset within a session.
    pub struct DatasetId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

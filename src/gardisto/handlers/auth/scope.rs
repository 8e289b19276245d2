//! Scope labels partitioning authentication state within one session.
//!
//! A session can hold several independent logins at once (a normal user
//! scope next to an administrative scope, say). Every gate operation is
//! scope-qualified; omitting a scope means the default scope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The well-known default scope label.
pub const DEFAULT_SCOPE: &str = "default";

/// Named partition of authentication state.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self(DEFAULT_SCOPE.to_string())
    }
}

impl From<&str> for Scope {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for Scope {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

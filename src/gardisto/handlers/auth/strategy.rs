//! Pluggable credential verification.
//!
//! The gate treats strategies as an opaque capability: one call, one
//! decision. Throttling, lockout, and retry policy belong to the strategy,
//! not to the gate.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;

use super::{error::StrategyError, principal::Principal, scope::Scope};

/// Credentials submitted to the login route, as a form or JSON body.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    #[serde(default)]
    pub scope: Option<Scope>,
}

impl Credentials {
    /// The scope these credentials authenticate, defaulting when omitted.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope.clone().unwrap_or_default()
    }
}

#[async_trait]
pub trait Strategy: Send + Sync {
    /// Verify credentials in a single pass.
    ///
    /// # Errors
    /// `Rejected` when the credentials are wrong, `Unavailable` when the
    /// strategy backend itself failed.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal, StrategyError>;
}

struct StaticUser {
    password: String,
    principal: Principal,
}

/// In-memory username/password strategy for the demo binary and tests.
/// Real deployments plug their own [`Strategy`]; password hashing is that
/// strategy's concern.
#[derive(Default)]
pub struct StaticStrategy {
    users: HashMap<String, StaticUser>,
}

impl StaticStrategy {
    #[must_use]
    pub fn with_user(mut self, username: &str, password: &str, principal: Principal) -> Self {
        self.users.insert(
            username.to_string(),
            StaticUser {
                password: password.to_string(),
                principal,
            },
        );
        self
    }
}

#[async_trait]
impl Strategy for StaticStrategy {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal, StrategyError> {
        self.users
            .get(&credentials.username)
            .filter(|user| user.password == credentials.password.expose_secret())
            .map(|user| user.principal.clone())
            .ok_or_else(|| StrategyError::Rejected("invalid username or password".to_string()))
    }
}

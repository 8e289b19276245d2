//! The auth gate: session-scoped authentication queries and the single
//! strategy dispatch.

use tracing::debug;

use super::{
    error::{GateError, StrategyError},
    principal::Principal,
    scope::Scope,
    session::SessionAccessor,
    state::GateState,
    strategy::Credentials,
};

/// Answers "is this request authenticated?" for a scope and runs credential
/// verification. Borrowed per request; owns nothing.
pub struct AuthGate<'a> {
    state: &'a GateState,
    sessions: &'a SessionAccessor,
}

impl<'a> AuthGate<'a> {
    #[must_use]
    pub fn new(state: &'a GateState, sessions: &'a SessionAccessor) -> Self {
        Self { state, sessions }
    }

    /// True iff a principal is stored for the scope.
    pub async fn is_authenticated(&self, scope: &Scope) -> Result<bool, GateError> {
        Ok(self.sessions.get(scope).await?.is_some())
    }

    /// The stored principal for the scope, if any.
    pub async fn current_principal(&self, scope: &Scope) -> Result<Option<Principal>, GateError> {
        Ok(self.sessions.get(scope).await?)
    }

    /// One strategy pass. On success the principal is stored for the
    /// credentials' scope; on rejection nothing is stored and the failure is
    /// the caller's to answer.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Principal, GateError> {
        match self.state.strategy().authenticate(credentials).await {
            Ok(principal) => {
                let scope = credentials.scope();
                self.sessions.set_principal(&principal, &scope).await?;
                debug!(scope = %scope, "principal authenticated");
                Ok(principal)
            }
            Err(StrategyError::Rejected(reason)) => {
                Err(GateError::AuthenticationFailure(reason))
            }
            Err(StrategyError::Unavailable(err)) => Err(GateError::Infrastructure(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gardisto::handlers::auth::{GateConfig, StaticStrategy};
    use anyhow::Result;
    use secrecy::SecretString;
    use std::sync::Arc;
    use tower_sessions::{MemoryStore, Session};

    fn alice() -> Principal {
        Principal {
            id: "u-1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        }
    }

    fn state() -> GateState {
        let strategy = StaticStrategy::default().with_user("alice", "secret", alice());
        GateState::new(GateConfig::new(), Arc::new(strategy))
    }

    fn accessor() -> SessionAccessor {
        SessionAccessor::new(Session::new(None, Arc::new(MemoryStore::default()), None))
    }

    fn credentials(password: &str, scope: Option<&str>) -> Credentials {
        Credentials {
            username: "alice".to_string(),
            password: SecretString::from(password.to_string()),
            scope: scope.map(Scope::from),
        }
    }

    #[tokio::test]
    async fn authenticate_stores_principal_for_the_scope() -> Result<()> {
        let state = state();
        let sessions = accessor();
        let gate = AuthGate::new(&state, &sessions);
        let admin = Scope::from("admin");

        gate.authenticate(&credentials("secret", Some("admin"))).await?;

        assert!(gate.is_authenticated(&admin).await?);
        assert_eq!(gate.current_principal(&admin).await?, Some(alice()));
        // The default scope is an independent partition.
        assert!(!gate.is_authenticated(&Scope::default()).await?);

        sessions.clear(Some(&admin)).await?;
        assert!(!gate.is_authenticated(&admin).await?);
        assert_eq!(gate.current_principal(&admin).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn rejection_stores_nothing() -> Result<()> {
        let state = state();
        let sessions = accessor();
        let gate = AuthGate::new(&state, &sessions);

        let outcome = gate.authenticate(&credentials("wrong", None)).await;
        assert!(matches!(
            outcome,
            Err(GateError::AuthenticationFailure(_))
        ));
        assert!(!gate.is_authenticated(&Scope::default()).await?);
        Ok(())
    }
}

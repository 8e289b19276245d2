//! Scoped authentication state in the request session.
//!
//! One session key holds the scope→principal map; the transient keys
//! (`return_to`, the flash notice, the bridge handshake stash) are consumed
//! read-then-delete. Absent keys read as `None`, never as an error; only
//! genuine store faults surface, unmodified.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower_sessions::{session::Error, Session};

use super::{oauth::HandshakeStash, principal::Principal, scope::Scope};

const SCOPES_KEY: &str = "gardisto.auth";
const RETURN_TO_KEY: &str = "gardisto.return_to";
const FLASH_KEY: &str = "gardisto.flash";
const HANDSHAKE_KEY: &str = "gardisto.handshake";

type ScopeMap = HashMap<String, Principal>;

/// One-shot notice surfaced on the next rendered page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Error,
    Notice,
}

impl Flash {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Notice,
            message: message.into(),
        }
    }
}

/// Accessor over the request-bound session record. Mutates only this
/// request's session; cross-request storage discipline belongs to the
/// underlying store.
#[derive(Clone, Debug)]
pub struct SessionAccessor {
    session: Session,
}

impl SessionAccessor {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The principal stored for a scope, if any.
    pub async fn get(&self, scope: &Scope) -> Result<Option<Principal>, Error> {
        let scopes: Option<ScopeMap> = self.session.get(SCOPES_KEY).await?;
        Ok(scopes.and_then(|mut map| map.remove(scope.as_str())))
    }

    /// Store a principal for a scope, replacing any previous login there.
    pub async fn set_principal(&self, principal: &Principal, scope: &Scope) -> Result<(), Error> {
        let mut scopes: ScopeMap = self.session.get(SCOPES_KEY).await?.unwrap_or_default();
        scopes.insert(scope.as_str().to_string(), principal.clone());
        self.session.insert(SCOPES_KEY, scopes).await
    }

    /// Clear one scope, or every scope when `None`. Transient keys are left
    /// alone.
    pub async fn clear(&self, scope: Option<&Scope>) -> Result<(), Error> {
        match scope {
            Some(scope) => {
                let mut scopes: ScopeMap =
                    self.session.get(SCOPES_KEY).await?.unwrap_or_default();
                scopes.remove(scope.as_str());
                self.session.insert(SCOPES_KEY, scopes).await
            }
            None => {
                self.session.remove::<ScopeMap>(SCOPES_KEY).await?;
                Ok(())
            }
        }
    }

    /// Remember the originally requested path. Writing the same path again
    /// is a no-op as far as the eventual redirect is concerned.
    pub async fn set_return_to(&self, path: &str) -> Result<(), Error> {
        self.session.insert(RETURN_TO_KEY, path.to_string()).await
    }

    /// Consume the captured path. A second take returns `None`.
    pub async fn take_return_to(&self) -> Result<Option<String>, Error> {
        self.session.remove::<String>(RETURN_TO_KEY).await
    }

    pub async fn set_flash(&self, flash: Flash) -> Result<(), Error> {
        self.session.insert(FLASH_KEY, flash).await
    }

    pub async fn take_flash(&self) -> Result<Option<Flash>, Error> {
        self.session.remove::<Flash>(FLASH_KEY).await
    }

    /// Park the bridge's request token/secret between the two handshake
    /// calls.
    pub async fn stash_handshake(&self, stash: &HandshakeStash) -> Result<(), Error> {
        self.session.insert(HANDSHAKE_KEY, stash.clone()).await
    }

    /// Consume the parked token/secret after the handshake completes.
    pub async fn take_handshake(&self) -> Result<Option<HandshakeStash>, Error> {
        self.session.remove::<HandshakeStash>(HANDSHAKE_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn accessor() -> SessionAccessor {
        let store = Arc::new(MemoryStore::default());
        SessionAccessor::new(Session::new(None, store, None))
    }

    fn alice() -> Principal {
        Principal {
            id: "u-1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        }
    }

    #[tokio::test]
    async fn principal_round_trip_is_scope_qualified() -> Result<()> {
        let sessions = accessor();
        let admin = Scope::from("admin");

        assert_eq!(sessions.get(&Scope::default()).await?, None);

        sessions.set_principal(&alice(), &Scope::default()).await?;
        assert_eq!(sessions.get(&Scope::default()).await?, Some(alice()));
        assert_eq!(sessions.get(&admin).await?, None);

        sessions.clear(Some(&Scope::default())).await?;
        assert_eq!(sessions.get(&Scope::default()).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn clear_without_scope_clears_every_scope() -> Result<()> {
        let sessions = accessor();
        let admin = Scope::from("admin");

        sessions.set_principal(&alice(), &Scope::default()).await?;
        sessions.set_principal(&alice(), &admin).await?;

        sessions.clear(None).await?;
        assert_eq!(sessions.get(&Scope::default()).await?, None);
        assert_eq!(sessions.get(&admin).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn clearing_one_scope_leaves_the_other() -> Result<()> {
        let sessions = accessor();
        let admin = Scope::from("admin");

        sessions.set_principal(&alice(), &Scope::default()).await?;
        sessions.set_principal(&alice(), &admin).await?;

        sessions.clear(Some(&admin)).await?;
        assert_eq!(sessions.get(&admin).await?, None);
        assert_eq!(sessions.get(&Scope::default()).await?, Some(alice()));
        Ok(())
    }

    #[tokio::test]
    async fn return_to_is_consumed_exactly_once() -> Result<()> {
        let sessions = accessor();

        sessions.set_return_to("/secret").await?;
        // Re-capturing the same path is idempotent.
        sessions.set_return_to("/secret").await?;

        assert_eq!(sessions.take_return_to().await?.as_deref(), Some("/secret"));
        assert_eq!(sessions.take_return_to().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn flash_is_consumed_exactly_once() -> Result<()> {
        let sessions = accessor();

        sessions.set_flash(Flash::notice("welcome back")).await?;
        assert_eq!(
            sessions.take_flash().await?,
            Some(Flash::notice("welcome back"))
        );
        assert_eq!(sessions.take_flash().await?, None);
        Ok(())
    }
}

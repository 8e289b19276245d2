//! Authorization guard: intercepts unauthenticated requests before they
//! reach a protected handler.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
    Extension,
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::debug;

use super::{
    principal::Principal, redirect_found, scope::Scope, session::SessionAccessor,
    state::GateState,
};

/// Check authentication for a scope; on failure produce the redirect that
/// ends the request.
///
/// The originally requested path is captured into `return_to` when referrer
/// tracking is on — except for the logout path itself, which would otherwise
/// send a freshly logged-in user straight back into logout.
///
/// # Errors
/// The guarding redirect (or a 500 on a session-store fault), ready to be
/// returned as the response.
pub async fn authorize(
    sessions: &SessionAccessor,
    state: &GateState,
    scope: &Scope,
    request_path: &str,
    failure_path: Option<&str>,
) -> Result<Principal, Response> {
    match sessions.get(scope).await {
        Ok(Some(principal)) => Ok(principal),
        Ok(None) => {
            let config = state.config();
            if config.auth_use_referrer() && request_path != config.auth_logout_path() {
                if let Err(err) = sessions.set_return_to(request_path).await {
                    return Err(super::GateError::Session(err).into_response());
                }
            }
            debug!(scope = %scope, path = request_path, "unauthenticated, redirecting");
            Err(redirect_found(
                failure_path.unwrap_or_else(|| config.auth_failure_path()),
            ))
        }
        Err(err) => Err(super::GateError::Session(err).into_response()),
    }
}

/// Extractor enforcing the gate on the default scope. Rejection is the
/// redirect response itself, so an unauthenticated request never reaches the
/// handler body.
pub struct RequireAuth(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(gate_state) = Extension::<Arc<GateState>>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let path = parts.uri.path().to_string();
        let sessions = SessionAccessor::new(session);

        authorize(&sessions, &gate_state, &Scope::default(), &path, None)
            .await
            .map(RequireAuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gardisto::handlers::auth::{GateConfig, StaticStrategy};
    use anyhow::Result;
    use axum::http::{header::LOCATION, StatusCode};
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn accessor() -> SessionAccessor {
        SessionAccessor::new(Session::new(None, Arc::new(MemoryStore::default()), None))
    }

    fn state(config: GateConfig) -> GateState {
        GateState::new(config, Arc::new(StaticStrategy::default()))
    }

    fn location(response: &Response) -> String {
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn authorize_redirects_and_is_idempotent() -> Result<()> {
        let state = state(GateConfig::new().with_auth_use_referrer(true));
        let sessions = accessor();

        let first = authorize(&sessions, &state, &Scope::default(), "/secret", None)
            .await
            .expect_err("unauthenticated");
        let second = authorize(&sessions, &state, &Scope::default(), "/secret", None)
            .await
            .expect_err("unauthenticated");

        assert_eq!(first.status(), StatusCode::FOUND);
        assert_eq!(location(&first), location(&second));
        assert_eq!(sessions.take_return_to().await?.as_deref(), Some("/secret"));
        Ok(())
    }

    #[tokio::test]
    async fn explicit_failure_path_wins_over_configured_one() {
        let state = state(GateConfig::new());
        let sessions = accessor();

        let response = authorize(
            &sessions,
            &state,
            &Scope::default(),
            "/secret",
            Some("/elsewhere"),
        )
        .await
        .expect_err("unauthenticated");

        assert_eq!(location(&response), "/elsewhere");
    }

    #[tokio::test]
    async fn logout_path_is_never_captured_as_return_to() -> Result<()> {
        let state = state(GateConfig::new().with_auth_use_referrer(true));
        let sessions = accessor();

        let _ = authorize(&sessions, &state, &Scope::default(), "/logout", None)
            .await
            .expect_err("unauthenticated");

        assert_eq!(sessions.take_return_to().await?, None);
        Ok(())
    }
}

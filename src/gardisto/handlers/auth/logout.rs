//! Logout: guard, clear, redirect.

use axum::{
    extract::{Extension, Query},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{
    error::GateError, guard::authorize, redirect_found, scope::Scope, session::SessionAccessor,
    state::GateState,
};

#[derive(Debug, Deserialize)]
pub struct LogoutParams {
    scope: Option<String>,
}

/// GET logout. Requires an authenticated session for the requested scope;
/// clears that scope, or every scope when none is named. The guard never
/// records the logout path as a return target.
pub async fn logout(
    Extension(state): Extension<Arc<GateState>>,
    session: Session,
    Query(params): Query<LogoutParams>,
) -> Result<Response, GateError> {
    let config = state.config();
    let sessions = SessionAccessor::new(session);

    let scope = params.scope.map(Scope::from);
    let guard_scope = scope.clone().unwrap_or_default();

    if let Err(response) = authorize(
        &sessions,
        &state,
        &guard_scope,
        config.auth_logout_path(),
        None,
    )
    .await
    {
        return Ok(response);
    }

    sessions.clear(scope.as_ref()).await?;

    Ok(redirect_found(config.auth_success_path()))
}

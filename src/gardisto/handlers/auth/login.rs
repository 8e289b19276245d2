//! Login flow: render the form, accept credentials, branch on outcome and
//! negotiated response shape.

use axum::{
    extract::{Extension, FromRequest, Request},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Json, Response},
    Form,
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{debug, warn};

use super::{
    error::GateError,
    failure,
    gate::AuthGate,
    oauth::HandshakeStash,
    principal::PrincipalPayload,
    redirect_found,
    scope::Scope,
    session::{Flash, SessionAccessor},
    state::GateState,
    strategy::Credentials,
};

/// GET login entry.
///
/// With the bridge enabled the login page is never shown: the handshake
/// starts immediately and the user is sent to the provider. Re-entry while
/// already logged in redirects to logout instead of re-presenting the form.
pub async fn login_form(
    Extension(state): Extension<Arc<GateState>>,
    session: Session,
) -> Result<Response, GateError> {
    let config = state.config();
    let sessions = SessionAccessor::new(session);

    if config.auth_use_oauth() {
        let Some(bridge) = state.bridge() else {
            warn!("auth_use_oauth is enabled but no identity bridge is configured");
            return Ok(redirect_found(config.auth_failure_path()));
        };
        return match bridge.begin_handshake().await {
            Ok(ticket) => {
                sessions.stash_handshake(&HandshakeStash::from(&ticket)).await?;
                Ok(redirect_found(ticket.authorize_url.as_str()))
            }
            Err(GateError::BridgeFailure(reason)) => {
                warn!(%reason, "could not start identity handshake");
                Ok(redirect_found(config.auth_failure_path()))
            }
            Err(err) => Err(err),
        };
    }

    let gate = AuthGate::new(&state, &sessions);
    if gate.is_authenticated(&Scope::default()).await? {
        return Ok(redirect_found(config.auth_logout_path()));
    }

    let flash = sessions.take_flash().await?;
    Ok(super::render::login_page(config, flash.as_ref()).into_response())
}

/// POST login submit.
pub async fn login_submit(
    Extension(state): Extension<Arc<GateState>>,
    session: Session,
    request: Request,
) -> Result<Response, GateError> {
    let headers = request.headers().clone();
    let credentials = match read_credentials(request).await {
        Ok(credentials) => credentials,
        Err(response) => return Ok(response),
    };

    let config = state.config();
    let sessions = SessionAccessor::new(session);
    let gate = AuthGate::new(&state, &sessions);

    match gate.authenticate(&credentials).await {
        Ok(principal) => {
            if wants_json(&headers) {
                return Ok(Json(PrincipalPayload::from(&principal)).into_response());
            }

            sessions
                .set_flash(Flash::notice(config.auth_success_message()))
                .await?;

            // The captured path is consumed here, exactly once.
            let return_to = if config.auth_use_referrer() {
                sessions.take_return_to().await?
            } else {
                None
            };
            Ok(redirect_found(
                return_to.as_deref().unwrap_or_else(|| config.auth_success_path()),
            ))
        }
        Err(GateError::AuthenticationFailure(reason)) => {
            // Rejections are answered by the failure responder, the same
            // entry point the middleware layer uses, not by a redirect of
            // this handler's own.
            debug!(%reason, "credentials rejected");
            Ok(failure::unauthenticated_response(&state))
        }
        Err(err) => Err(err),
    }
}

/// Pull credentials out of a form or JSON body, by Content-Type.
async fn read_credentials(request: Request) -> Result<Credentials, Response> {
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        let Json(credentials) = Json::<Credentials>::from_request(request, &())
            .await
            .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()).into_response())?;
        Ok(credentials)
    } else {
        let Form(credentials) = Form::<Credentials>::from_request(request, &())
            .await
            .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()).into_response())?;
        Ok(credentials)
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

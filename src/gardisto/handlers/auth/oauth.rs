//! External identity bridge: an opaque two-step handshake against an
//! external authorization provider.
//!
//! The gate only drives the redirect choreography. Token exchange, signature
//! schemes, and provider quirks live behind [`IdentityBridge`]; the request
//! token/secret pair is parked in the session between the two calls and
//! consumed on successful completion.

use async_trait::async_trait;
use axum::{
    extract::{Extension, Query},
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tower_sessions::Session;
use tracing::warn;
use url::Url;

use super::{
    error::GateError,
    principal::Principal,
    redirect_found,
    scope::Scope,
    session::{Flash, SessionAccessor},
    state::GateState,
};

/// Callback query parameters, passed through to the bridge untouched.
pub type CallbackParams = HashMap<String, String>;

/// Result of starting the handshake: where to send the user, and the
/// request token/secret the provider expects back.
#[derive(Clone, Debug)]
pub struct HandshakeTicket {
    pub token: String,
    pub secret: String,
    pub authorize_url: Url,
}

/// The token/secret pair parked in the session between the two calls.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandshakeStash {
    pub token: String,
    pub secret: String,
}

impl From<&HandshakeTicket> for HandshakeStash {
    fn from(ticket: &HandshakeTicket) -> Self {
        Self {
            token: ticket.token.clone(),
            secret: ticket.secret.clone(),
        }
    }
}

#[async_trait]
pub trait IdentityBridge: Send + Sync {
    /// Obtain a request token and the provider URL to redirect the user to.
    ///
    /// # Errors
    /// `BridgeFailure` when the provider cannot be reached or rejects us.
    async fn begin_handshake(&self) -> Result<HandshakeTicket, GateError>;

    /// Exchange the callback parameters for an authenticated principal.
    ///
    /// # Errors
    /// `BridgeFailure` when the exchange fails.
    async fn complete_handshake(&self, params: &CallbackParams)
        -> Result<Principal, GateError>;
}

/// GET callback handler: complete the handshake and feed the principal
/// through the same session-storing path as a credential login.
pub async fn callback(
    Extension(state): Extension<Arc<GateState>>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Response, GateError> {
    let config = state.config();
    let sessions = SessionAccessor::new(session);

    // A callback while the bridge is off is a misconfiguration, not an
    // attack: log it and send the user to the failure page.
    if !config.auth_use_oauth() {
        warn!("identity callback received but auth_use_oauth is disabled");
        return Ok(redirect_found(config.auth_failure_path()));
    }
    let Some(bridge) = state.bridge() else {
        warn!("auth_use_oauth is enabled but no identity bridge is configured");
        return Ok(redirect_found(config.auth_failure_path()));
    };

    match bridge.complete_handshake(&params).await {
        Ok(principal) => {
            sessions.take_handshake().await?;
            sessions.set_principal(&principal, &Scope::default()).await?;
            sessions
                .set_flash(Flash::notice(config.auth_success_message()))
                .await?;
            Ok(redirect_found(config.auth_success_path()))
        }
        Err(GateError::BridgeFailure(reason)) => {
            warn!(%reason, "identity handshake failed");
            Ok(redirect_found(config.auth_failure_path()))
        }
        Err(err) => Err(err),
    }
}

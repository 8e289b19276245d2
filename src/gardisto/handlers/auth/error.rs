//! Error taxonomy for the authentication gate.
//!
//! Credential rejection and bridge failures are recovered locally and always
//! end in a well-formed HTTP response; session-store and strategy
//! infrastructure faults pass through to the host layer unmasked.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Outcome of a single strategy pass.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The strategy examined the credentials and said no.
    #[error("credentials rejected: {0}")]
    Rejected(String),
    /// The strategy itself failed (backend down, timeout, ...). Not an
    /// authentication decision.
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error("authentication failed: {0}")]
    AuthenticationFailure(String),
    #[error("external identity handshake failed: {0}")]
    BridgeFailure(String),
    #[error("authentication layer misconfigured: {0}")]
    Misconfiguration(String),
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error(transparent)]
    Infrastructure(#[from] anyhow::Error),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthenticationFailure(reason) => {
                (StatusCode::UNAUTHORIZED, reason).into_response()
            }
            Self::BridgeFailure(reason) | Self::Misconfiguration(reason) => {
                error!("{reason}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Session(err) => {
                error!("session store error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Infrastructure(err) => {
                error!("authentication infrastructure error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

//! Session authentication gate.
//!
//! This module wires a pluggable credential strategy into the request
//! pipeline: a scope-aware session accessor, an auth gate answering "who is
//! logged in?", an authorization guard that intercepts unauthenticated
//! requests, and the login/logout/failure routes. An optional external
//! identity bridge completes an OAuth-style handshake and feeds the resulting
//! principal through the same gate.
//!
//! All authentication state lives in the request session, partitioned by
//! [`Scope`] so one session can hold independent logins (e.g. a user scope
//! and an admin scope). Configuration is immutable after startup; no request
//! handler mutates it.

mod config;
mod error;
mod failure;
mod gate;
mod guard;
mod login;
mod logout;
mod oauth;
mod principal;
mod render;
mod scope;
mod session;
mod state;
mod strategy;

pub use config::{GateConfig, FAILURE_APP_TAG};
pub use error::{GateError, StrategyError};
pub use failure::unauthenticated;
pub use gate::AuthGate;
pub use guard::{authorize, RequireAuth};
pub use login::{login_form, login_submit};
pub use logout::logout;
pub use oauth::{callback, CallbackParams, HandshakeTicket, IdentityBridge};
pub use principal::{Principal, PrincipalPayload};
pub use scope::Scope;
pub use session::{Flash, FlashKind, SessionAccessor};
pub use state::GateState;
pub use strategy::{Credentials, StaticStrategy, Strategy};

use axum::{
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Plain `302 Found` redirect. The login round-trip uses `302`, which
/// axum's `Redirect` helper does not emit.
pub(crate) fn redirect_found(location: &str) -> Response {
    HeaderValue::from_str(location).map_or_else(
        |_| StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        |value| (StatusCode::FOUND, [(LOCATION, value)]).into_response(),
    )
}

//! Failure responder: the handler invoked when a protected dispatch fails
//! before any application code runs.
//!
//! Distinct from "login submitted with bad credentials" only in how it is
//! reached: the login handler routes strategy rejections here too, but this
//! route is also mounted on its own so the middleware layer can short-circuit
//! unauthenticated dispatches without involving application logic.

use axum::{
    extract::Extension,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{config::FAILURE_APP_TAG, render, session::Flash, state::GateState};

/// Marker set when this responder recognizes itself as the configured
/// failure app, suppressing any default middleware handling downstream.
const CUSTOM_FAILURE_HEADER: &str = "x-auth-custom-failure";

/// POST /unauthenticated
pub async fn unauthenticated(Extension(state): Extension<Arc<GateState>>) -> Response {
    unauthenticated_response(&state)
}

/// 401 plus the login page with the configured error notice attached.
pub(super) fn unauthenticated_response(state: &GateState) -> Response {
    let config = state.config();

    let flash = Flash::error(config.auth_error_message());
    let mut response =
        (StatusCode::UNAUTHORIZED, render::login_page(config, Some(&flash))).into_response();

    // Handler identity is compared on stable tags: only mark the failure
    // custom-handled when we are the configured failure app.
    if config.auth_failure_app() == FAILURE_APP_TAG {
        response.headers_mut().insert(
            HeaderName::from_static(CUSTOM_FAILURE_HEADER),
            HeaderValue::from_static("1"),
        );
    }

    response
}

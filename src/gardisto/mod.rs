use crate::gardisto::handlers::{
    auth::{self, GateState},
    health, root,
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub mod handlers;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

/// Build the authentication router: login, logout, failure, and callback
/// routes at the paths the configuration names. Shared state and the session
/// layer are applied by the caller so the routes can be merged into a larger
/// application router.
#[must_use]
pub fn router(state: &GateState) -> Router {
    let config = state.config();

    Router::new()
        .route("/unauthenticated", post(auth::unauthenticated))
        .route(
            config.auth_login_path(),
            get(auth::login_form).post(auth::login_submit),
        )
        .route(config.auth_logout_path(), get(auth::logout))
        .route(config.auth_oauth_callback_path(), get(auth::callback))
}

/// Assemble the full application: auth routes plus the landing, health, and
/// guarded demo pages, wrapped in the request-id, tracing, state, and session
/// layers.
#[must_use]
pub fn app(state: Arc<GateState>) -> Router {
    let sessions_enabled = state.config().sessions();

    let mut app = router(&state)
        .route("/", get(root::root))
        .route("/private", get(root::private))
        .route("/health", get(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        );

    if sessions_enabled {
        app = app.layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false));
    }

    app
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, state: Arc<GateState>) -> Result<()> {
    let app = app(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

use axum::{
    response::{Html, IntoResponse},
    Extension,
};
use std::sync::Arc;

use crate::gardisto::handlers::auth::{GateState, RequireAuth};

// Landing page: links into the login flow so the gate can be exercised from a
// browser without any extra wiring.
pub async fn root(Extension(state): Extension<Arc<GateState>>) -> impl IntoResponse {
    let config = state.config();

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<body>\n\
         <h1>gardisto</h1>\n\
         <ul>\n\
         <li><a href=\"{login}\">log in</a></li>\n\
         <li><a href=\"{logout}\">log out</a></li>\n\
         <li><a href=\"/private\">private page</a></li>\n\
         </ul>\n</body>\n</html>\n",
        login = config.auth_login_path(),
        logout = config.auth_logout_path(),
    ))
}

// Guarded demo page. Unauthenticated requests never reach the body; the
// extractor rejects them with a redirect to the failure path.
pub async fn private(RequireAuth(principal): RequireAuth) -> impl IntoResponse {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<body>\n<p>Hello, {}.</p>\n</body>\n</html>\n",
        principal.name
    ))
}

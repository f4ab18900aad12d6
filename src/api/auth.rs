//! Authentication status endpoint

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tgparse_core::ClientHandle;
use tracing::error;

/// Response for GET /auth/status
#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    /// Whether a session token was configured, not whether it is valid
    pub session_exists: bool,
}

#[derive(Debug, Serialize)]
struct AuthStatusError {
    authenticated: bool,
    error: String,
}

async fn auth_status(Extension(client): Extension<Arc<ClientHandle>>) -> Response {
    match client.connection_status() {
        Ok(connected) => Json(AuthStatusResponse {
            authenticated: connected,
            session_exists: client.session_configured(),
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "Error checking auth status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthStatusError {
                    authenticated: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Create auth routes
pub fn auth_routes() -> Router {
    Router::new().route("/auth/status", get(auth_status))
}

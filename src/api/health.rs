//! Health check endpoint
//!
//! `GET /health` always answers 200 and reports whether the Telegram client
//! is connected.

use axum::extract::Extension;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tgparse_core::ClientHandle;

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "telegram-parser-api";

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub client_connected: bool,
}

async fn health_check(Extension(client): Extension<Arc<ClientHandle>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        client_connected: client.is_connected(),
    })
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{get, handle, send, SessionBehavior};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_connected() {
        let app = health_routes().layer(Extension(handle(SessionBehavior::Connected, false)));
        let (status, body) = send(app, get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "status": "ok",
                "service": "telegram-parser-api",
                "client_connected": true,
            })
        );
    }

    #[tokio::test]
    async fn test_health_ok_in_every_state() {
        for behavior in [
            SessionBehavior::Missing,
            SessionBehavior::Disconnected,
            SessionBehavior::Erroring,
        ] {
            let app = health_routes().layer(Extension(handle(behavior, true)));
            let (status, body) = send(app, get("/health")).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "ok");
            assert_eq!(body["client_connected"], false);
        }
    }
}

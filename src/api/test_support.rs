//! Helpers for router tests

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tgparse_core::{ClientHandle, ConnectionError, MessagingSession};
use tower::ServiceExt;

/// How the session behind a test handle behaves
#[derive(Debug, Clone, Copy)]
pub enum SessionBehavior {
    /// No session at all (mock mode)
    Missing,
    Connected,
    Disconnected,
    /// Errors when asked for its state
    Erroring,
}

struct StaticSession(SessionBehavior);

impl MessagingSession for StaticSession {
    fn is_connected(&self) -> Result<bool, ConnectionError> {
        match self.0 {
            SessionBehavior::Connected => Ok(true),
            SessionBehavior::Missing | SessionBehavior::Disconnected => Ok(false),
            SessionBehavior::Erroring => {
                Err(ConnectionError::Protocol("socket closed".to_string()))
            }
        }
    }
}

pub fn handle(behavior: SessionBehavior, session_configured: bool) -> Arc<ClientHandle> {
    match behavior {
        SessionBehavior::Missing => Arc::new(ClientHandle::mock(session_configured)),
        other => Arc::new(ClientHandle::connected(
            Arc::new(StaticSession(other)),
            session_configured,
        )),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(uri: &str, content_type: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

/// Run one request through the router and decode the JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

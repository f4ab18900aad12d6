//! Web API module for tgparse
//!
//! Provides REST API endpoints for:
//! - Health and authentication status
//! - Channel parsing
//! - Excel export

pub mod auth;
pub mod channels;
pub mod error;
pub mod export;
pub mod health;

#[cfg(test)]
mod test_support;

use axum::Router;

pub use auth::auth_routes;
pub use channels::channels_routes;
pub use export::export_routes;
pub use health::health_routes;

/// Create the API router with all endpoints
///
/// Handlers expect an `Extension<Arc<ClientHandle>>` layer.
pub fn api_router() -> Router {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(channels_routes())
        .merge(export_routes())
}

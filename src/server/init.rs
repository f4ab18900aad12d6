//! Server initialization and main run loop
//!
//! Bootstrap order: configuration, credentials, one connect attempt, then
//! the HTTP listener. The client handle is complete before the first
//! request can arrive.

use super::config::AppConfig;
use super::loader::load_config;
use super::validation::{validate_config, validate_production_config};
use anyhow::{Context, Result};
use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tgparse_core::{wait_for_shutdown_signal, ClientHandle, Credentials};
use tgparse_telegram::MtprotoConnector;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Run the server
pub async fn run(port_override: Option<u16>) -> Result<()> {
    info!("Starting tgparse v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config().context("Failed to load configuration")?;
    if let Some(port) = port_override {
        config.server.port = port;
    }
    validate_config(&config)?;
    info!("Configuration loaded");

    let credentials = Credentials::from_env();
    validate_production_config(&config, &credentials)?;

    let connector = MtprotoConnector::new(&config.telegram.session_file);
    let client = Arc::new(
        ClientHandle::bootstrap(
            &credentials,
            &connector,
            config.telegram.connect_timeout(),
        )
        .await,
    );
    if client.is_connected() {
        info!(state = %client.state(), "Telegram client ready");
    } else {
        warn!(
            state = %client.state(),
            mock_mode = client.is_mock_mode(),
            "Telegram client unavailable; /channels/parse will answer 503"
        );
    }

    let app = build_app(&config, client);

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind to {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let addr = listener.local_addr().context("Failed to read bound address")?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("tgparse shutdown complete");
    Ok(())
}

/// Build the main router with all endpoints and layers
pub fn build_app(config: &AppConfig, client: Arc<ClientHandle>) -> Router {
    let app = Router::new()
        .merge(crate::api::api_router())
        .route("/", get(|| async { "Telegram Parser API" }))
        .layer(Extension(client))
        .layer(TraceLayer::new_for_http());

    if config.server.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

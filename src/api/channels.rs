//! Channel parsing endpoint
//!
//! POST /channels/parse returns sample messages for the requested channel.
//! The request is validated first, then gated on the client connection.

use super::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, Extension},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tgparse_core::{mock_messages, ChannelMessage, ClientHandle, ParseRequest};
use tracing::{error, info, warn};

/// Response for POST /channels/parse
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub channel: String,
    pub messages: Vec<ChannelMessage>,
    pub total: usize,
}

async fn parse_channel(
    Extension(client): Extension<Arc<ClientHandle>>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ParseResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        error!(error = %rejection.body_text(), "Error parsing channel");
        ApiError::from(rejection)
    })?;

    let channel = request.channel_url()?.to_string();

    if let Err(e) = client.require_connected() {
        warn!(channel = %channel, "Attempt to parse channel while Telegram client is not connected.");
        return Err(e.into());
    }

    let limit = request.limit();
    let messages = mock_messages(limit);
    info!(
        channel = %channel,
        limit,
        total = messages.len(),
        "Parsed channel with sample data"
    );

    Ok(Json(ParseResponse {
        success: true,
        channel,
        total: messages.len(),
        messages,
    }))
}

/// Create channel routes
pub fn channels_routes() -> Router {
    Router::new().route("/channels/parse", post(parse_channel))
}

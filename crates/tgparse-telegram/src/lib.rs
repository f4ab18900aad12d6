//! Telegram - MTProto connector
//!
//! Implements [`Connector`] for real Telegram user sessions. The protocol
//! work is delegated to `grammers`, compiled in with the `grammers`
//! feature. Without it every connect attempt fails with
//! [`ConnectionError::Unsupported`] and the server runs degraded.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "grammers")]
mod mtproto;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tgparse_core::{AppCredentials, ConnectionError, Connector, MessagingSession};

/// Default location of the local session file
pub const DEFAULT_SESSION_FILE: &str = "telegram.session";

/// Parse the configured application identifier
pub fn parse_api_id(raw: &str) -> Result<i32, ConnectionError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ConnectionError::InvalidApiId(raw.to_string()))
}

/// Connector that opens MTProto sessions
#[derive(Debug, Clone)]
pub struct MtprotoConnector {
    session_file: PathBuf,
}

impl MtprotoConnector {
    /// Create a connector that falls back to `session_file` when no session
    /// token is configured
    pub fn new(session_file: impl Into<PathBuf>) -> Self {
        Self {
            session_file: session_file.into(),
        }
    }

    /// Path of the local session file
    #[must_use]
    pub fn session_file(&self) -> &Path {
        &self.session_file
    }
}

impl Default for MtprotoConnector {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_FILE)
    }
}

#[async_trait]
impl Connector for MtprotoConnector {
    fn name(&self) -> &'static str {
        "mtproto"
    }

    async fn connect(
        &self,
        credentials: &AppCredentials,
    ) -> Result<Arc<dyn MessagingSession>, ConnectionError> {
        let api_id = parse_api_id(&credentials.api_id)?;

        #[cfg(feature = "grammers")]
        {
            mtproto::connect(api_id, credentials, &self.session_file).await
        }

        #[cfg(not(feature = "grammers"))]
        {
            tracing::debug!(api_id, "MTProto connector built without grammers");
            Err(ConnectionError::Unsupported)
        }
    }
}

/// A Telegram session whose liveness is tracked by the network task
pub struct TelegramSession {
    connected: Arc<AtomicBool>,
    #[cfg(feature = "grammers")]
    _client: grammers_client::Client,
}

impl TelegramSession {
    /// Whether the network task still runs
    #[must_use]
    pub fn connected_flag(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl MessagingSession for TelegramSession {
    fn is_connected(&self) -> Result<bool, ConnectionError> {
        Ok(self.connected_flag())
    }
}

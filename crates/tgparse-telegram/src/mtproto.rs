//! grammers-backed session establishment

use crate::TelegramSession;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use grammers_client::{Client, Config, InitParams};
use grammers_session::Session;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tgparse_core::{AppCredentials, ConnectionError, MessagingSession, SecureString};
use tracing::{debug, info, warn};

/// Connect to Telegram and spawn the task that drives the connection
pub(crate) async fn connect(
    api_id: i32,
    credentials: &AppCredentials,
    session_file: &Path,
) -> Result<Arc<dyn MessagingSession>, ConnectionError> {
    let session = load_session(credentials.session.as_ref(), session_file)?;

    let client = Client::connect(Config {
        session,
        api_id,
        api_hash: credentials.api_hash.expose().to_string(),
        params: InitParams::default(),
    })
    .await
    .map_err(|e| ConnectionError::Protocol(e.to_string()))?;

    match client.is_authorized().await {
        Ok(true) => info!("Telegram session is authorized"),
        Ok(false) => warn!(
            "Telegram session is not authorized; supply TELEGRAM_SESSION from a logged-in session"
        ),
        Err(e) => warn!(error = %e, "Failed to check Telegram authorization"),
    }

    if credentials.session.is_none() {
        match client.session().save_to_file(session_file) {
            Ok(()) => debug!(path = %session_file.display(), "Session file saved"),
            Err(e) => warn!(path = %session_file.display(), error = %e, "Failed to save session file"),
        }
    }

    let connected = Arc::new(AtomicBool::new(true));
    let flag = connected.clone();
    let runner = client.clone();
    tokio::spawn(async move {
        match runner.run_until_disconnected().await {
            Ok(()) => info!("Telegram connection closed"),
            Err(e) => warn!(error = %e, "Telegram connection lost"),
        }
        flag.store(false, Ordering::SeqCst);
    });

    Ok(Arc::new(TelegramSession {
        connected,
        _client: client,
    }))
}

/// Load the session from the token (base64 session blob) or the session file
fn load_session(token: Option<&SecureString>, session_file: &Path) -> Result<Session, ConnectionError> {
    match token {
        Some(token) => {
            let bytes = BASE64
                .decode(token.expose().trim())
                .map_err(|e| ConnectionError::Session(format!("token is not valid base64: {}", e)))?;
            Session::load(&bytes).map_err(|e| ConnectionError::Session(e.to_string()))
        }
        None => Session::load_file_or_create(session_file).map_err(|e| {
            ConnectionError::Session(format!("{}: {}", session_file.display(), e))
        }),
    }
}

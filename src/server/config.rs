//! Server configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow any origin (the UI is served from a different port)
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: true,
        }
    }
}

/// Telegram client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Session file used when no session token is configured
    #[serde(default = "default_session_file")]
    pub session_file: String,
    /// Upper bound on the startup connect attempt
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl TelegramConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            session_file: default_session_file(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_session_file() -> String {
    tgparse_telegram::DEFAULT_SESSION_FILE.to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

pub(crate) fn default_true() -> bool {
    true
}

// ============================================================================
// Shared Configuration Validator
// ============================================================================

/// Validation shared by the loader and the doctor command
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate_port(p: u16) -> Result<(), String> {
        if p == 0 {
            Err("Port cannot be 0".to_string())
        } else {
            Ok(())
        }
    }

    pub fn validate_connect_timeout(secs: u64) -> Result<(), String> {
        if secs == 0 {
            Err("telegram.connect_timeout_secs must be at least 1".to_string())
        } else {
            Ok(())
        }
    }
}

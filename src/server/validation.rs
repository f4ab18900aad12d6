//! Configuration validation
//!
//! Hard errors for unusable settings, warnings for risky production setups.

use super::config::{AppConfig, ConfigValidator};
use anyhow::{anyhow, Result};
use tgparse_core::Credentials;
use tracing::warn;

/// Reject unusable settings
pub fn validate_config(config: &AppConfig) -> Result<()> {
    ConfigValidator::validate_port(config.server.port).map_err(|e| anyhow!(e))?;
    ConfigValidator::validate_connect_timeout(config.telegram.connect_timeout_secs)
        .map_err(|e| anyhow!(e))?;
    Ok(())
}

/// Warn about settings that are risky in production
pub fn validate_production_config(config: &AppConfig, credentials: &Credentials) -> Result<()> {
    let is_production = std::env::var("TGPARSE_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false);

    if !is_production {
        return Ok(());
    }

    if config.server.host == "0.0.0.0" {
        warn!(
            "SECURITY WARNING: Server is binding to all interfaces (0.0.0.0) in production. \
             The API has no authentication of its own; put it behind a reverse proxy."
        );
    }

    if config.server.cors_permissive {
        warn!("SECURITY WARNING: CORS allows any origin in production.");
    }

    if !credentials.is_complete() {
        warn!(
            missing = ?credentials.missing(),
            "Telegram credentials are incomplete in production. The API will run in mock mode."
        );
    }

    Ok(())
}

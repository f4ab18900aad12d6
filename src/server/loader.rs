//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let env_name = std::env::var("TGPARSE_ENV").unwrap_or_else(|_| "development".to_string());
    load_config_with(&env_name, std::env::var("PORT").ok())
}

/// Load configuration for a named environment with an optional `PORT` override
pub fn load_config_with(env_name: &str, port: Option<String>) -> Result<AppConfig> {
    let config = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
        .add_source(File::with_name("config/local").required(false))
        // 3. Environment variables, e.g. TGPARSE_SERVER__PORT
        .add_source(
            Environment::with_prefix("TGPARSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        // 4. Bare PORT wins, as deployments set it directly
        .set_override_option("server.port", port.filter(|p| !p.trim().is_empty()))
        .context("Failed to apply PORT override")?
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

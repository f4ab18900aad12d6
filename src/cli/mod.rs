//! CLI module for tgparse
//!
//! Provides commands:
//! - `serve`: Run the HTTP API (default when no command is given)
//! - `doctor`: Configuration and connectivity diagnostics

use clap::{Parser, Subcommand};

pub mod doctor;

/// Telegram channel parser API
#[derive(Parser, Debug)]
#[command(name = "tgparse")]
#[command(about = "HTTP API for parsing and exporting Telegram channel messages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve {
        /// Listen port (overrides PORT and configuration files)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run configuration and connectivity diagnostics
    Doctor,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve { port }) => crate::server::run(port).await,
        Some(Commands::Doctor) => doctor::run().await,
        None => crate::server::run(None).await,
    }
}

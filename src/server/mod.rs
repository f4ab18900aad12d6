//! Server module for tgparse
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `validation`: Configuration and production checks
//! - `init`: Bootstrap and run loop

pub mod config;
mod init;
mod loader;
mod validation;

pub use init::run;
pub use loader::load_config;

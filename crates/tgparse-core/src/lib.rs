//! tgparse Core - Telegram channel parser
//!
//! This crate provides the pieces of the tgparse API that do not depend on
//! the HTTP layer:
//! - Credentials: Loading app credentials and session tokens from the environment
//! - Client: The messaging client handle and its connection lifecycle
//! - Messages: Channel message model and mock message generation
//! - Export: Export receipt returned to the UI
//! - Shutdown: Signal handling for graceful shutdown

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod credentials;
pub mod error;
pub mod export;
pub mod messages;
pub mod shutdown;

pub use client::{
    ClientHandle, ConnectionError, ConnectionState, Connector, DegradedReason, MessagingSession,
};
pub use credentials::{AppCredentials, Credentials, SecureString};
pub use error::{Error, Result};
pub use export::{ExportReceipt, ExportRequest};
pub use messages::{mock_messages, ChannelMessage, ParseRequest};
pub use shutdown::wait_for_shutdown_signal;

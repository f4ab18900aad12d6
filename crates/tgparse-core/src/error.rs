//! Error types for tgparse-core

use crate::client::ConnectionError;
use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Required request field missing or empty
    #[error("{0}")]
    Validation(String),

    /// Messaging client unavailable
    #[error("{0}")]
    NotConnected(String),

    /// Connection to the messaging service failed
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

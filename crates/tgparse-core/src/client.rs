//! Messaging client handle
//!
//! The handle is built exactly once, during process bootstrap, and then
//! shared read-only with every request handler. Its lifecycle is
//!
//! ```text
//! Absent -> Connecting -> Connected
//!                      \-> Failed
//! ```
//!
//! There is no way back from `Failed` short of restarting the process, and
//! nothing tears down a `Connected` handle.
//!
//! The protocol library itself sits behind two traits: a [`Connector`]
//! that establishes a session from app credentials, and the resulting
//! [`MessagingSession`] that reports whether it is still connected.

use crate::credentials::{AppCredentials, Credentials};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Message returned to callers when the client is unavailable
pub const NOT_CONNECTED_MESSAGE: &str = "Client not connected.";

/// Errors raised while establishing or querying a messaging session
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    /// The application identifier is not a valid integer
    #[error("invalid API_ID '{0}': expected an integer")]
    InvalidApiId(String),

    /// The session token or session file could not be used
    #[error("session error: {0}")]
    Session(String),

    /// The protocol library reported an error
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The connect attempt did not finish in time
    #[error("connection attempt timed out after {0}s")]
    Timeout(u64),

    /// No protocol implementation was compiled in
    #[error("MTProto support is not compiled in (rebuild with --features mtproto)")]
    Unsupported,
}

/// Lifecycle state of the client handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No connection attempted
    Absent,
    /// Connect in progress
    Connecting,
    /// Session established
    Connected,
    /// Connect attempt failed
    Failed,
}

impl ConnectionState {
    /// Whether the lifecycle allows moving from `self` to `next`
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Absent, Self::Connecting)
                | (Self::Connecting, Self::Connected)
                | (Self::Connecting, Self::Failed)
        )
    }

    /// Whether no further transition is possible
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Connected | Self::Failed)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Why the handle has no usable session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// `API_ID` or `API_HASH` missing: mock mode, no connection attempted
    MissingCredentials,
    /// The connect attempt failed with the given message
    ConnectionFailed(String),
}

/// An established session with the messaging service
#[cfg_attr(test, mockall::automock)]
pub trait MessagingSession: Send + Sync {
    /// Whether the underlying connection is still up
    fn is_connected(&self) -> std::result::Result<bool, ConnectionError>;
}

/// Establishes sessions with the messaging service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connector: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Connect using the given app credentials
    async fn connect(
        &self,
        credentials: &AppCredentials,
    ) -> std::result::Result<Arc<dyn MessagingSession>, ConnectionError>;
}

/// Process-wide handle to the messaging session
pub struct ClientHandle {
    session: Option<Arc<dyn MessagingSession>>,
    state: ConnectionState,
    degraded: Option<DegradedReason>,
    session_configured: bool,
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("has_session", &self.session.is_some())
            .field("state", &self.state)
            .field("degraded", &self.degraded)
            .field("session_configured", &self.session_configured)
            .finish()
    }
}

fn transition(from: ConnectionState, to: ConnectionState) -> ConnectionState {
    debug_assert!(from.can_transition_to(to), "invalid transition {from} -> {to}");
    debug!(from = %from, to = %to, "Client state transition");
    to
}

impl ClientHandle {
    /// Handle for mock mode (credentials missing, nothing attempted)
    #[must_use]
    pub fn mock(session_configured: bool) -> Self {
        Self {
            session: None,
            state: ConnectionState::Absent,
            degraded: Some(DegradedReason::MissingCredentials),
            session_configured,
        }
    }

    /// Handle wrapping an established session
    #[must_use]
    pub fn connected(session: Arc<dyn MessagingSession>, session_configured: bool) -> Self {
        Self {
            session: Some(session),
            state: ConnectionState::Connected,
            degraded: None,
            session_configured,
        }
    }

    /// Handle for a failed connect attempt
    #[must_use]
    pub fn failed(error: &ConnectionError, session_configured: bool) -> Self {
        Self {
            session: None,
            state: ConnectionState::Failed,
            degraded: Some(DegradedReason::ConnectionFailed(error.to_string())),
            session_configured,
        }
    }

    /// Run one connect attempt, bounded by `timeout`
    pub async fn connect(
        credentials: &AppCredentials,
        connector: &dyn Connector,
        timeout: Duration,
    ) -> std::result::Result<Arc<dyn MessagingSession>, ConnectionError> {
        match tokio::time::timeout(timeout, connector.connect(credentials)).await {
            Ok(result) => result,
            Err(_) => Err(ConnectionError::Timeout(timeout.as_secs())),
        }
    }

    /// Bootstrap phase: build the handle from the startup credentials
    ///
    /// Missing credentials yield a mock-mode handle without touching the
    /// connector. A connect failure is logged and yields a failed handle;
    /// it never aborts the process.
    pub async fn bootstrap(
        credentials: &Credentials,
        connector: &dyn Connector,
        timeout: Duration,
    ) -> Self {
        let session_configured = credentials.session_configured();

        let Some(app) = credentials.app() else {
            warn!(
                missing = ?credentials.missing(),
                "Telegram API credentials not found. Client will not be initialized. Running in mock mode."
            );
            return Self::mock(session_configured);
        };

        let state = transition(ConnectionState::Absent, ConnectionState::Connecting);
        info!(
            connector = connector.name(),
            session_token = session_configured,
            timeout_secs = timeout.as_secs(),
            "Initializing Telegram client"
        );

        match Self::connect(&app, connector, timeout).await {
            Ok(session) => {
                transition(state, ConnectionState::Connected);
                info!("Telegram client initialized successfully");
                Self::connected(session, session_configured)
            }
            Err(e) => {
                transition(state, ConnectionState::Failed);
                error!(error = %e, "Failed to initialize Telegram client");
                Self::failed(&e, session_configured)
            }
        }
    }

    /// Lifecycle state reached during bootstrap
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Why no session is available, if none is
    #[must_use]
    pub fn degraded(&self) -> Option<&DegradedReason> {
        self.degraded.as_ref()
    }

    /// Whether the process runs without credentials
    #[must_use]
    pub fn is_mock_mode(&self) -> bool {
        matches!(self.degraded, Some(DegradedReason::MissingCredentials))
    }

    /// Whether a session token was configured at startup
    #[must_use]
    pub fn session_configured(&self) -> bool {
        self.session_configured
    }

    /// Ask the session whether it is connected
    ///
    /// `Ok(false)` when there is no session; errors come from the session.
    pub fn connection_status(&self) -> std::result::Result<bool, ConnectionError> {
        match &self.session {
            Some(session) => session.is_connected(),
            None => Ok(false),
        }
    }

    /// Whether a session is present and reports itself connected
    ///
    /// Errors while querying count as not connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection_status().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to query client connection state");
            false
        })
    }

    /// Fail with [`Error::NotConnected`] unless the client is connected
    pub fn require_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(Error::NotConnected(NOT_CONNECTED_MESSAGE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(vars: &[(&'static str, &'static str)]) -> Credentials {
        let vars = vars.to_vec();
        Credentials::from_lookup(move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        })
    }

    fn session_reporting(connected: bool) -> Arc<dyn MessagingSession> {
        let mut session = MockMessagingSession::new();
        session
            .expect_is_connected()
            .returning(move || Ok(connected));
        Arc::new(session)
    }

    struct SlowConnector;

    #[async_trait]
    impl Connector for SlowConnector {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn connect(
            &self,
            _credentials: &AppCredentials,
        ) -> std::result::Result<Arc<dyn MessagingSession>, ConnectionError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(ConnectionError::Protocol("unreachable".to_string()))
        }
    }

    #[test]
    fn test_state_transitions() {
        use ConnectionState::*;

        assert!(Absent.can_transition_to(Connecting));
        assert!(Connecting.can_transition_to(Connected));
        assert!(Connecting.can_transition_to(Failed));

        assert!(!Failed.can_transition_to(Connecting));
        assert!(!Failed.can_transition_to(Connected));
        assert!(!Connected.can_transition_to(Connecting));
        assert!(!Absent.can_transition_to(Connected));

        assert!(Connected.is_terminal());
        assert!(Failed.is_terminal());
        assert!(!Connecting.is_terminal());
    }

    #[tokio::test]
    async fn test_bootstrap_without_credentials_skips_connector() {
        let mut connector = MockConnector::new();
        connector.expect_connect().never();

        let creds = credentials(&[("TELEGRAM_SESSION", "token")]);
        let handle = ClientHandle::bootstrap(&creds, &connector, Duration::from_secs(5)).await;

        assert_eq!(handle.state(), ConnectionState::Absent);
        assert!(handle.is_mock_mode());
        assert!(!handle.is_connected());
        assert!(handle.session_configured());
    }

    #[tokio::test]
    async fn test_bootstrap_connects_once() {
        let mut connector = MockConnector::new();
        connector.expect_name().return_const("mock");
        connector
            .expect_connect()
            .times(1)
            .returning(|creds| {
                assert_eq!(creds.api_id, "12345");
                Ok(session_reporting(true))
            });

        let creds = credentials(&[("API_ID", "12345"), ("API_HASH", "hash")]);
        let handle = ClientHandle::bootstrap(&creds, &connector, Duration::from_secs(5)).await;

        assert_eq!(handle.state(), ConnectionState::Connected);
        assert!(handle.degraded().is_none());
        assert!(handle.is_connected());
        assert!(!handle.session_configured());
        assert!(handle.require_connected().is_ok());
    }

    #[tokio::test]
    async fn test_bootstrap_failure_is_degraded() {
        let mut connector = MockConnector::new();
        connector.expect_name().return_const("mock");
        connector
            .expect_connect()
            .times(1)
            .returning(|_| Err(ConnectionError::Protocol("auth key unregistered".to_string())));

        let creds = credentials(&[("API_ID", "12345"), ("API_HASH", "hash")]);
        let handle = ClientHandle::bootstrap(&creds, &connector, Duration::from_secs(5)).await;

        assert_eq!(handle.state(), ConnectionState::Failed);
        assert!(!handle.is_mock_mode());
        assert!(!handle.is_connected());
        match handle.degraded() {
            Some(DegradedReason::ConnectionFailed(msg)) => {
                assert!(msg.contains("auth key unregistered"))
            }
            other => panic!("unexpected degraded reason: {:?}", other),
        }

        let err = handle.require_connected().unwrap_err();
        assert_eq!(err.to_string(), NOT_CONNECTED_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bootstrap_timeout_fails() {
        let creds = credentials(&[("API_ID", "12345"), ("API_HASH", "hash")]);
        let handle = ClientHandle::bootstrap(&creds, &SlowConnector, Duration::from_secs(30)).await;

        assert_eq!(handle.state(), ConnectionState::Failed);
        assert_eq!(
            handle.degraded(),
            Some(&DegradedReason::ConnectionFailed(
                ConnectionError::Timeout(30).to_string()
            ))
        );
    }

    #[test]
    fn test_disconnected_session_is_not_connected() {
        let handle = ClientHandle::connected(session_reporting(false), false);
        assert_eq!(handle.state(), ConnectionState::Connected);
        assert!(!handle.is_connected());
        assert!(matches!(
            handle.require_connected(),
            Err(Error::NotConnected(_))
        ));
    }

    #[test]
    fn test_session_error_counts_as_disconnected() {
        let mut session = MockMessagingSession::new();
        session
            .expect_is_connected()
            .returning(|| Err(ConnectionError::Protocol("socket closed".to_string())));
        let handle = ClientHandle::connected(Arc::new(session), true);

        assert!(handle.connection_status().is_err());
        assert!(!handle.is_connected());
    }

    #[test]
    fn test_debug_does_not_need_session_debug() {
        let handle = ClientHandle::mock(false);
        let debug = format!("{:?}", handle);
        assert!(debug.contains("has_session: false"));
    }
}

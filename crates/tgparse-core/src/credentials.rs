//! Telegram app credentials
//!
//! Credentials are read once at process start from three environment
//! variables:
//! - `API_ID`: application identifier
//! - `API_HASH`: application secret
//! - `TELEGRAM_SESSION`: optional persisted session token
//!
//! Absence is a valid configuration state. When either the identifier or
//! the secret is missing the process runs in mock mode; nothing here fails.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variable holding the application identifier
pub const API_ID_VAR: &str = "API_ID";
/// Environment variable holding the application secret
pub const API_HASH_VAR: &str = "API_HASH";
/// Environment variable holding the persisted session token
pub const SESSION_VAR: &str = "TELEGRAM_SESSION";

// ============================================================================
// Secure String
// ============================================================================

/// A string that is cryptographically cleared from memory when dropped
///
/// - Value is zeroized on drop (via `ZeroizeOnDrop`)
/// - Debug and Display implementations redact the value
///
/// ```
/// use tgparse_core::credentials::SecureString;
///
/// let secret = SecureString::new("0123456789abcdef");
/// assert_eq!(secret.expose(), "0123456789abcdef");
/// assert!(!format!("{:?}", secret).contains("0123"));
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create a new secure string
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Temporarily expose the string value
    ///
    /// The returned reference should not be stored or cloned unnecessarily.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString([REDACTED, {} bytes])", self.inner.len())
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecureString {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes().ct_eq(other.inner.as_bytes()).into()
    }
}

impl Eq for SecureString {}

// ============================================================================
// Credentials
// ============================================================================

/// Complete app credentials, available only when both the identifier and
/// the secret are configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCredentials {
    /// Application identifier (numeric for Telegram, kept as configured)
    pub api_id: String,
    /// Application secret
    pub api_hash: SecureString,
    /// Persisted session token, if any
    pub session: Option<SecureString>,
}

/// Credentials as found in the environment at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_id: Option<String>,
    api_hash: Option<SecureString>,
    session: Option<SecureString>,
}

impl Credentials {
    /// Read credentials from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup function
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_id: read(API_ID_VAR),
            api_hash: read(API_HASH_VAR).map(SecureString::new),
            session: read(SESSION_VAR).map(SecureString::new),
        }
    }

    /// Complete app credentials, or `None` when running in mock mode
    #[must_use]
    pub fn app(&self) -> Option<AppCredentials> {
        match (&self.api_id, &self.api_hash) {
            (Some(api_id), Some(api_hash)) => Some(AppCredentials {
                api_id: api_id.clone(),
                api_hash: api_hash.clone(),
                session: self.session.clone(),
            }),
            _ => None,
        }
    }

    /// Whether both the identifier and the secret are present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.api_id.is_some() && self.api_hash.is_some()
    }

    /// Whether a session token was supplied (says nothing about its validity)
    #[must_use]
    pub fn session_configured(&self) -> bool {
        self.session.is_some()
    }

    /// Names of the required variables that are missing
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_id.is_none() {
            missing.push(API_ID_VAR);
        }
        if self.api_hash.is_none() {
            missing.push(API_HASH_VAR);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_complete_credentials() {
        let creds = Credentials::from_lookup(lookup(&[
            ("API_ID", "12345"),
            ("API_HASH", "0123456789abcdef"),
            ("TELEGRAM_SESSION", "token"),
        ]));

        assert!(creds.is_complete());
        assert!(creds.session_configured());
        let app = creds.app().unwrap();
        assert_eq!(app.api_id, "12345");
        assert_eq!(app.api_hash.expose(), "0123456789abcdef");
        assert_eq!(app.session.as_ref().map(SecureString::expose), Some("token"));
    }

    #[test]
    fn test_missing_hash_means_mock_mode() {
        let creds = Credentials::from_lookup(lookup(&[("API_ID", "12345")]));
        assert!(!creds.is_complete());
        assert!(creds.app().is_none());
        assert_eq!(creds.missing(), vec!["API_HASH"]);
    }

    #[test]
    fn test_empty_values_are_absent() {
        let creds = Credentials::from_lookup(lookup(&[
            ("API_ID", ""),
            ("API_HASH", "  "),
            ("TELEGRAM_SESSION", ""),
        ]));
        assert!(!creds.is_complete());
        assert!(!creds.session_configured());
        assert_eq!(creds.missing(), vec!["API_ID", "API_HASH"]);
    }

    #[test]
    fn test_session_without_app_credentials() {
        let creds = Credentials::from_lookup(lookup(&[("TELEGRAM_SESSION", "token")]));
        assert!(creds.session_configured());
        assert!(creds.app().is_none());
    }

    #[test]
    fn test_secure_string_redaction() {
        let secret = SecureString::new("super-secret-hash");
        assert_eq!(format!("{:?}", secret), "SecureString([REDACTED, 17 bytes])");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert!(!format!("{:?}", secret).contains("super"));

        let creds = Credentials::from_lookup(lookup(&[
            ("API_ID", "1"),
            ("API_HASH", "super-secret-hash"),
        ]));
        assert!(!format!("{:?}", creds).contains("super-secret-hash"));
    }
}

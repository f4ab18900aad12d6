//! Channel messages
//!
//! Parsing does not call the messaging service yet. It synthesizes a
//! deterministic sequence of sample messages, capped at
//! [`MOCK_MESSAGE_CAP`] items.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Limit applied when a parse request does not specify one
pub const DEFAULT_PARSE_LIMIT: i64 = 100;

/// Maximum number of mock messages returned per request
pub const MOCK_MESSAGE_CAP: i64 = 20;

/// Error message for a parse request without a channel URL
pub const CHANNEL_URL_REQUIRED: &str = "Channel URL is required";

/// A single channel message as exchanged with the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Message id within the channel
    pub id: i64,
    /// Message text
    pub text: String,
    /// Publication time (RFC 3339)
    pub date: String,
    /// View count
    pub views: i64,
    /// Forward count
    pub forwards: i64,
}

/// Body of `POST /channels/parse`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseRequest {
    /// Channel link, e.g. `https://t.me/name`
    #[serde(default)]
    pub channel_url: Option<String>,
    /// Maximum number of messages wanted
    ///
    /// Integers outside the `i64` range saturate. An explicit `null` is
    /// rejected rather than treated as absent.
    #[serde(default, deserialize_with = "saturating_limit")]
    pub limit: Option<i64>,
}

impl ParseRequest {
    /// The channel URL, or a validation error when missing or empty
    pub fn channel_url(&self) -> Result<&str> {
        match self.channel_url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(Error::Validation(CHANNEL_URL_REQUIRED.to_string())),
        }
    }

    /// Requested limit, defaulting to [`DEFAULT_PARSE_LIMIT`]
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PARSE_LIMIT)
    }
}

fn saturating_limit<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LimitVisitor;

    impl<'de> Visitor<'de> for LimitVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer limit")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        // Integer literals too wide for u64 arrive as floats
        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<i64, E> {
            if v.is_finite() && v.fract() == 0.0 && v.abs() >= i64::MAX as f64 {
                Ok(if v > 0.0 { i64::MAX } else { i64::MIN })
            } else {
                Err(E::invalid_type(de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_i64(LimitVisitor).map(Some)
}

/// Timestamp stamped on every mock message (2024-01-01T12:00:00Z)
#[must_use]
pub fn mock_timestamp() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// Generate `min(limit, 20)` sample messages; `limit <= 0` yields none
#[must_use]
pub fn mock_messages(limit: i64) -> Vec<ChannelMessage> {
    let date = mock_timestamp().to_rfc3339_opts(SecondsFormat::Secs, true);
    let count = limit.clamp(0, MOCK_MESSAGE_CAP);

    (1..=count)
        .map(|i| ChannelMessage {
            id: i,
            text: format!("Sample message {}", i),
            date: date.clone(),
            views: 100 + i * 10,
            forwards: 5 + i,
        })
        .collect()
}

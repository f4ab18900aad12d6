//! Excel export
//!
//! No file is produced yet; every export request receives the same receipt
//! pointing at the download location the UI expects.

use crate::messages::ChannelMessage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Download location reported for every export
pub const EXPORT_DOWNLOAD_URL: &str = "/api/download/export.xlsx";

/// File name reported for every export
pub const EXPORT_FILENAME: &str = "telegram_export.xlsx";

/// Body of `POST /export/excel`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    /// Messages selected for export
    #[serde(default)]
    pub messages: Vec<ChannelMessage>,
}

impl ExportRequest {
    /// Decode a request body, tolerating anything that is not a valid request
    #[must_use]
    pub fn from_body(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice(body) {
            Ok(req) => Some(req),
            Err(e) => {
                debug!(error = %e, "Ignoring undecodable export body");
                None
            }
        }
    }
}

/// Response of `POST /export/excel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    /// Always `true`
    pub success: bool,
    /// Where the UI should fetch the file from
    pub download_url: &'static str,
    /// Suggested file name
    pub filename: &'static str,
}

impl ExportReceipt {
    /// The fixed receipt returned for every export
    #[must_use]
    pub fn excel() -> Self {
        Self {
            success: true,
            download_url: EXPORT_DOWNLOAD_URL,
            filename: EXPORT_FILENAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_serialization() {
        let json = serde_json::to_value(ExportReceipt::excel()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "download_url": "/api/download/export.xlsx",
                "filename": "telegram_export.xlsx",
            })
        );
    }

    #[test]
    fn test_request_tolerates_bad_bodies() {
        assert!(ExportRequest::from_body(b"not json").is_none());
        assert!(ExportRequest::from_body(b"").is_none());

        let req = ExportRequest::from_body(b"{}").unwrap();
        assert!(req.messages.is_empty());

        let body = br#"{"messages": [{"id": 1, "text": "hi", "date": "2024-01-01T12:00:00Z", "views": 1, "forwards": 0}]}"#;
        let req = ExportRequest::from_body(body).unwrap();
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].text, "hi");
    }
}

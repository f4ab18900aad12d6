//! Excel export endpoint
//!
//! POST /export/excel always answers with the same receipt. The body is
//! only looked at to log how many messages were submitted.

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    routing::post,
    Json, Router,
};
use tgparse_core::{ExportReceipt, ExportRequest};
use tracing::{info, warn};

async fn export_to_excel(body: Result<Bytes, BytesRejection>) -> Json<ExportReceipt> {
    match body {
        Ok(bytes) => {
            let submitted = ExportRequest::from_body(&bytes).map(|req| req.messages.len());
            info!(messages = ?submitted, "Excel export requested");
        }
        Err(e) => warn!(error = %e, "Excel export requested with unreadable body"),
    }

    Json(ExportReceipt::excel())
}

/// Create export routes
pub fn export_routes() -> Router {
    Router::new().route("/export/excel", post(export_to_excel))
}

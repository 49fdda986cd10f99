//! Enquiry tracking endpoints
//!
//! The enquiries themselves live in the hosted document store; the back
//! office lists them and advances their status as the sale progresses.

use crate::{ApiResult, AppState};
use axum::extract::{Path, State};
use axum::Json;
use lithos_common::enquiry::EnquiryStatus;
use lithos_common::remote::StoredEnquiry;
use serde::Deserialize;
use tracing::info;

/// Status-update payload
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: EnquiryStatus,
}

/// GET /api/enquiries
///
/// Newest first, as returned by the document store.
pub async fn list_enquiries(State(state): State<AppState>) -> ApiResult<Json<Vec<StoredEnquiry>>> {
    let enquiries = state.backend.list_enquiries().await?;
    Ok(Json(enquiries))
}

/// PUT /api/enquiries/:id/status
pub async fn update_enquiry_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    state.backend.update_status(&id, payload.status).await?;
    info!("Enquiry {} moved to status {}", id, payload.status);
    Ok(Json(serde_json::json!({ "success": true })))
}

//! Enquiry workflow endpoints
//!
//! Item Builder (upsert), List Aggregator (list/remove/count) and the
//! Submission Coordinator's HTTP surface.

use crate::{cart, ApiError, ApiResult, AppState};
use axum::extract::{Path, State};
use axum::Json;
use lithos_common::db::Product;
use lithos_common::enquiry::{EnquiryLineItem, Unit};
use lithos_common::events::LithosEvent;
use serde::{Deserialize, Serialize};

/// Request payload for upserting one line item
#[derive(Debug, Deserialize)]
pub struct UpsertLineItemRequest {
    pub product_id: i64,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub measurement: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Acknowledgment carrying the new pending-list size
#[derive(Debug, Serialize)]
pub struct EnquiryAck {
    pub success: bool,
    pub count: usize,
}

/// Pending-list size for the header badge
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// Response for a successful submission
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub enquiry_id: String,
}

/// GET /api/enquiry/items
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<EnquiryLineItem>> {
    Json(state.store.load())
}

/// GET /api/enquiry/count
pub async fn item_count(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.store.load().len(),
    })
}

/// POST /api/enquiry/items
///
/// Upserts one line item keyed by product id: an existing entry is replaced
/// in place, a new product is appended. No partial upsert happens on
/// validation failure.
pub async fn upsert_item(
    State(state): State<AppState>,
    Json(payload): Json<UpsertLineItemRequest>,
) -> ApiResult<Json<EnquiryAck>> {
    if !payload.quantity.is_finite() || payload.quantity < 1.0 {
        return Err(ApiError::BadRequest(
            "quantity: must be a number of at least 1".to_string(),
        ));
    }

    // Denormalize name and image from the catalog row
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(payload.product_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("catalog query failed: {e}")))?
        .ok_or_else(|| ApiError::NotFound(format!("product {}", payload.product_id)))?;

    let item = EnquiryLineItem {
        product_id: product.id,
        product_name: product.name,
        product_image: product.image_url,
        unit: payload.unit,
        quantity: payload.quantity,
        display_value: EnquiryLineItem::format_display_value(payload.quantity, payload.unit),
        measurement: payload.measurement.filter(|m| !m.trim().is_empty()),
        description: payload.description.filter(|d| !d.trim().is_empty()),
    };

    let mut items = state.store.load();
    cart::upsert(&mut items, item);
    state.store.save(&items)?;

    state.event_bus.emit_lossy(LithosEvent::EnquiryListChanged {
        count: items.len(),
        timestamp: chrono::Utc::now(),
    });

    Ok(Json(EnquiryAck {
        success: true,
        count: items.len(),
    }))
}

/// DELETE /api/enquiry/items/:product_id
///
/// Removing an absent product id is an idempotent no-op.
pub async fn remove_item(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> ApiResult<Json<EnquiryAck>> {
    let mut items = state.store.load();

    if cart::remove(&mut items, product_id) {
        state.store.save(&items)?;
        state.event_bus.emit_lossy(LithosEvent::EnquiryListChanged {
            count: items.len(),
            timestamp: chrono::Utc::now(),
        });
    }

    Ok(Json(EnquiryAck {
        success: true,
        count: items.len(),
    }))
}

/// POST /api/enquiry/submit
pub async fn submit_enquiry(
    State(state): State<AppState>,
    Json(contact): Json<crate::submit::ContactDetails>,
) -> ApiResult<Json<SubmitResponse>> {
    let enquiry_id = state.coordinator.submit(contact).await?;
    Ok(Json(SubmitResponse {
        success: true,
        enquiry_id,
    }))
}

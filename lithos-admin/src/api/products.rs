//! Product CRUD endpoints

use crate::{ApiError, ApiResult, AppState};
use axum::extract::{Path, State};
use axum::Json;
use lithos_common::db::Product;
use lithos_common::enquiry::Unit;
use lithos_common::events::LithosEvent;
use serde::Deserialize;
use std::str::FromStr;
use tracing::info;

/// Create/update payload for a catalog product
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// "SFT" or "Each Piece"
    pub unit: String,
}

impl ProductPayload {
    fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::BadRequest("name: must not be empty".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(ApiError::BadRequest("category: must not be empty".to_string()));
        }
        Unit::from_str(&self.unit)
            .map_err(|_| ApiError::BadRequest(format!("unit: unknown unit '{}'", self.unit)))?;
        Ok(())
    }
}

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name")
        .fetch_all(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("catalog query failed: {e}")))?;
    Ok(Json(products))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Json<Product>> {
    payload.validate()?;

    let result = sqlx::query(
        "INSERT INTO products (name, category, description, image_url, unit) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(payload.name.trim())
    .bind(payload.category.trim())
    .bind(&payload.description)
    .bind(&payload.image_url)
    .bind(&payload.unit)
    .execute(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("product insert failed: {e}")))?;

    let id = result.last_insert_rowid();
    let product = fetch_product(&state, id).await?;

    info!("Created product {} ({})", id, product.name);
    state.event_bus.emit_lossy(LithosEvent::ProductCreated {
        product_id: id,
        timestamp: chrono::Utc::now(),
    });

    Ok(Json(product))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Json<Product>> {
    payload.validate()?;

    let result = sqlx::query(
        "UPDATE products SET name = ?, category = ?, description = ?, image_url = ?, unit = ? \
         WHERE id = ?",
    )
    .bind(payload.name.trim())
    .bind(payload.category.trim())
    .bind(&payload.description)
    .bind(&payload.image_url)
    .bind(&payload.unit)
    .bind(id)
    .execute(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("product update failed: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("product {id}")));
    }

    let product = fetch_product(&state, id).await?;
    state.event_bus.emit_lossy(LithosEvent::ProductUpdated {
        product_id: id,
        timestamp: chrono::Utc::now(),
    });

    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("product delete failed: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("product {id}")));
    }

    info!("Deleted product {}", id);
    state.event_bus.emit_lossy(LithosEvent::ProductDeleted {
        product_id: id,
        timestamp: chrono::Utc::now(),
    });

    Ok(Json(serde_json::json!({ "success": true })))
}

async fn fetch_product(state: &AppState, id: i64) -> ApiResult<Product> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("catalog query failed: {e}")))?
        .ok_or_else(|| ApiError::NotFound(format!("product {id}")))
}

//! Product catalog read endpoints

use crate::{ApiError, ApiResult, AppState};
use axum::extract::{Path, Query, State};
use axum::Json;
use lithos_common::db::Product;
use serde::Deserialize;

/// Query parameters for the catalog listing
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Restrict the listing to one category
    pub category: Option<String>,
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = match query.category {
        Some(category) => {
            sqlx::query_as::<_, Product>(
                "SELECT * FROM products WHERE category = ? ORDER BY name",
            )
            .bind(category)
            .fetch_all(&state.db)
            .await
        }
        None => {
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name")
                .fetch_all(&state.db)
                .await
        }
    }
    .map_err(|e| ApiError::Internal(format!("catalog query failed: {e}")))?;

    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("catalog query failed: {e}")))?
        .ok_or_else(|| ApiError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

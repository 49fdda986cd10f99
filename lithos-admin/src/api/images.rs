//! Site-content image upload endpoints
//!
//! Images are pushed to the hosted object store; only the resulting URL is
//! recorded locally so the site pages can reference it.

use crate::{ApiError, ApiResult, AppState};
use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lithos_common::db::SiteImage;
use lithos_common::events::LithosEvent;
use serde::Deserialize;
use tracing::info;

/// Upload payload: the image content travels base64-encoded
#[derive(Debug, Deserialize)]
pub struct UploadImageRequest {
    /// Page slot this image fills (e.g. "hero", "about")
    pub section: String,
    pub file_name: String,
    pub content_base64: String,
}

/// GET /api/images
pub async fn list_images(State(state): State<AppState>) -> ApiResult<Json<Vec<SiteImage>>> {
    let images =
        sqlx::query_as::<_, SiteImage>("SELECT * FROM site_images ORDER BY uploaded_at DESC")
            .fetch_all(&state.db)
            .await
            .map_err(|e| ApiError::Internal(format!("site_images query failed: {e}")))?;
    Ok(Json(images))
}

/// POST /api/images
pub async fn upload_image(
    State(state): State<AppState>,
    Json(payload): Json<UploadImageRequest>,
) -> ApiResult<Json<SiteImage>> {
    let section = payload.section.trim();
    if section.is_empty() {
        return Err(ApiError::BadRequest("section: must not be empty".to_string()));
    }

    let file_name = payload.file_name.trim();
    if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.contains("..") {
        return Err(ApiError::BadRequest(
            "file_name: must be a plain file name".to_string(),
        ));
    }

    let bytes = BASE64
        .decode(payload.content_base64.as_bytes())
        .map_err(|e| ApiError::BadRequest(format!("content_base64: {e}")))?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("content_base64: empty content".to_string()));
    }

    let object_name = format!("site/{}/{}", section, file_name);
    let url = state
        .objects
        .put(&object_name, bytes, content_type_for(file_name))
        .await?;

    let result = sqlx::query("INSERT INTO site_images (section, url) VALUES (?, ?)")
        .bind(section)
        .bind(&url)
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("site_images insert failed: {e}")))?;

    let image = sqlx::query_as::<_, SiteImage>("SELECT * FROM site_images WHERE id = ?")
        .bind(result.last_insert_rowid())
        .fetch_one(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("site_images query failed: {e}")))?;

    info!("Uploaded site image for section '{}': {}", section, url);
    state.event_bus.emit_lossy(LithosEvent::SiteImageUploaded {
        section: section.to_string(),
        timestamp: chrono::Utc::now(),
    });

    Ok(Json(image))
}

/// Content type from the file extension; the object store serves it as-is
fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "webp" => "image/webp",
        Some(ext) if ext == "gif" => "image/gif",
        Some(ext) if ext == "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

//! Database models

use serde::{Deserialize, Serialize};

/// One catalog product
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    /// Enquiry unit, "SFT" or "Each Piece" (see enquiry::Unit)
    pub unit: String,
    pub created_at: String,
}

/// One uploaded site-content image
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteImage {
    pub id: i64,
    /// Page slot this image fills (e.g. "hero", "about")
    pub section: String,
    pub url: String,
    pub uploaded_at: String,
}

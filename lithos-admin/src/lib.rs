//! lithos-admin library - back office service
//!
//! Password-gated product CRUD, enquiry review and status tracking against
//! the hosted document store, and site-content image uploads.

pub mod api;
pub mod auth;
pub mod error;
pub mod storage;

pub use crate::error::{ApiError, ApiResult};

use crate::auth::AuthGate;
use crate::storage::ObjectStore;
use axum::Router;
use lithos_common::events::EventBus;
use lithos_common::remote::EnquiryBackend;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog database (writable from the back office)
    pub db: SqlitePool,
    /// Event bus for back-office events
    pub event_bus: EventBus,
    /// Hosted document-store access
    pub backend: Arc<dyn EnquiryBackend>,
    /// Object storage for site images
    pub objects: Arc<dyn ObjectStore>,
    /// Login gate and live sessions
    pub auth: Arc<AuthGate>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        event_bus: EventBus,
        backend: Arc<dyn EnquiryBackend>,
        objects: Arc<dyn ObjectStore>,
        auth: Arc<AuthGate>,
    ) -> Self {
        Self {
            db,
            event_bus,
            backend,
            objects,
            auth,
        }
    }
}

/// Build application router
///
/// Protected routes require a live admin session; health, login, and the
/// SSE status stream do not.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post, put};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    let protected = Router::new()
        .route("/api/products", get(api::list_products).post(api::create_product))
        .route(
            "/api/products/:id",
            put(api::update_product).delete(api::delete_product),
        )
        .route("/api/enquiries", get(api::list_enquiries))
        .route("/api/enquiries/:id/status", put(api::update_enquiry_status))
        .route("/api/images", get(api::list_images).post(api::upload_image))
        .route("/api/auth/logout", post(auth::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let public = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/events", get(api::event_stream))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

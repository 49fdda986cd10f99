//! lithos-shop library - shopfront service
//!
//! Serves the product catalog and owns the enquiry workflow: the local
//! pending-enquiry store, line-item upsert, the aggregate list, and the
//! submission coordinator. Every open shopfront tab is a client of this
//! service; the pending-list change signal reaches them over SSE.

pub mod api;
pub mod cart;
pub mod error;
pub mod store;
pub mod submit;

pub use crate::error::{ApiError, ApiResult};

use crate::store::EnquiryStore;
use crate::submit::SubmissionCoordinator;
use axum::Router;
use lithos_common::events::EventBus;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog database (read-only from the shop's perspective)
    pub db: SqlitePool,
    /// Event bus backing the SSE change signal
    pub event_bus: EventBus,
    /// Pending-enquiry store
    pub store: Arc<dyn EnquiryStore>,
    /// Submit-action coordinator
    pub coordinator: Arc<SubmissionCoordinator>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        event_bus: EventBus,
        store: Arc<dyn EnquiryStore>,
        coordinator: Arc<SubmissionCoordinator>,
    ) -> Self {
        Self {
            db,
            event_bus,
            store,
            coordinator,
        }
    }
}

/// Build application router
///
/// The static marketing site is served from its own origin, so the API
/// allows cross-origin requests; on a localhost install both ends are local
/// anyway.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/api/products", get(api::list_products))
        .route("/api/products/:id", get(api::get_product))
        .route(
            "/api/enquiry/items",
            get(api::list_items).post(api::upsert_item),
        )
        .route("/api/enquiry/items/:product_id", delete(api::remove_item))
        .route("/api/enquiry/count", get(api::item_count))
        .route("/api/enquiry/submit", post(api::submit_enquiry))
        .route("/events", get(api::event_stream))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

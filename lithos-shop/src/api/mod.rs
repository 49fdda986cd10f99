//! HTTP API handlers for lithos-shop

pub mod catalog;
pub mod enquiry;
pub mod health;
pub mod sse;

pub use catalog::{get_product, list_products};
pub use enquiry::{item_count, list_items, remove_item, submit_enquiry, upsert_item};
pub use health::health_routes;
pub use sse::event_stream;

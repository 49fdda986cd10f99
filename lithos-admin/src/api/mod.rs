//! HTTP API handlers for lithos-admin

pub mod enquiries;
pub mod health;
pub mod images;
pub mod products;
pub mod sse;

pub use enquiries::{list_enquiries, update_enquiry_status};
pub use health::health_routes;
pub use images::{list_images, upload_image};
pub use products::{create_product, delete_product, list_products, update_product};
pub use sse::event_stream;

//! # Lithos Common Library
//!
//! Shared code for the Lithos catalog & enquiry services including:
//! - Database models, schema and seed data
//! - Event types (LithosEvent enum) and the EventBus
//! - Enquiry domain types (line items, submissions, statuses)
//! - Hosted document-store and mail-provider clients
//! - Configuration loading
//! - SSE utilities

pub mod config;
pub mod db;
pub mod enquiry;
pub mod error;
pub mod events;
pub mod mail;
pub mod remote;
pub mod sse;

pub use error::{Error, Result};

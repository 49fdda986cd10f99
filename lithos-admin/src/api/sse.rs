//! Server-Sent Events for the back office
//!
//! The back office has no domain events to stream to its own UI; the
//! heartbeat stream drives the connection status indicator.

use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /events - heartbeat-only SSE stream
pub async fn event_stream() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    lithos_common::sse::create_heartbeat_sse_stream("lithos-admin")
}

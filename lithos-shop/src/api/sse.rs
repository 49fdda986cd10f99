//! Server-Sent Events for the shopfront
//!
//! Forwards pending-list change events to every connected tab so header
//! badges and the aggregate page refresh without a reload.

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use lithos_common::events::LithosEvent;
use lithos_common::sse::HEARTBEAT_INTERVAL;
use std::convert::Infallible;
use tracing::{debug, info, warn};

/// GET /events - SSE stream of enquiry change signals
///
/// Streams events:
/// - EnquiryListChanged (upsert, removal, clear-on-submit)
/// - EnquirySubmitted
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to shop events");

    // Subscribe to event broadcast
    let mut rx = state.event_bus.subscribe();

    let stream = async_stream::stream! {
        // Send initial connected status
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            tokio::select! {
                // Heartbeat keeps idle connections alive
                _ = tokio::time::sleep(HEARTBEAT_INTERVAL) => {
                    debug!("SSE: Sending heartbeat");
                    yield Ok(Event::default().comment("heartbeat"));
                }

                // Broadcast events
                Ok(event) = rx.recv() => {
                    match &event {
                        LithosEvent::EnquiryListChanged { .. }
                        | LithosEvent::EnquirySubmitted { .. } => {
                            let event_type = event.event_type();

                            match serde_json::to_string(&event) {
                                Ok(event_json) => {
                                    debug!("SSE: Broadcasting {}", event_type);
                                    yield Ok(Event::default()
                                        .event(event_type)
                                        .data(event_json));
                                }
                                Err(e) => {
                                    warn!("SSE: Failed to serialize event {}: {}", event_type, e);
                                }
                            }
                        }
                        _ => {
                            // Back-office events are not the shopper's concern
                        }
                    }
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(HEARTBEAT_INTERVAL)
            .text("heartbeat"),
    )
}

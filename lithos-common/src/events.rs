//! Event types for the Lithos event system
//!
//! Provides shared event definitions and the EventBus used by both services.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Lithos event types
///
/// Events are broadcast via the EventBus and serialized for SSE transmission
/// to connected browser tabs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LithosEvent {
    /// Pending enquiry list changed (upsert, removal, or clear-on-submit)
    ///
    /// The cross-view refresh signal: any open shopfront tab re-reads the
    /// pending list (header badge, aggregate page) when it arrives. The
    /// count is advisory; views re-read rather than trusting the payload.
    EnquiryListChanged {
        count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A batch enquiry was successfully written to the hosted store
    EnquirySubmitted {
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Catalog product created via the back office
    ProductCreated {
        product_id: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Catalog product updated via the back office
    ProductUpdated {
        product_id: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Catalog product deleted via the back office
    ProductDeleted {
        product_id: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Site-content image uploaded to object storage
    SiteImageUploaded {
        section: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl LithosEvent {
    /// Get event type as string for SSE event names and filtering
    pub fn event_type(&self) -> &str {
        match self {
            LithosEvent::EnquiryListChanged { .. } => "EnquiryListChanged",
            LithosEvent::EnquirySubmitted { .. } => "EnquirySubmitted",
            LithosEvent::ProductCreated { .. } => "ProductCreated",
            LithosEvent::ProductUpdated { .. } => "ProductUpdated",
            LithosEvent::ProductDeleted { .. } => "ProductDeleted",
            LithosEvent::SiteImageUploaded { .. } => "SiteImageUploaded",
        }
    }
}

/// Central event distribution bus for application-wide events
///
/// Wraps tokio::broadcast, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
///
/// Delivery is best-effort: subscribers that connect after an emit simply
/// miss it, which is the accepted semantics of the change signal.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<LithosEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<LithosEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: LithosEvent,
    ) -> Result<usize, broadcast::error::SendError<LithosEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring whether anyone is listening
    ///
    /// The change signal is fire-and-forget; an empty audience is normal.
    pub fn emit_lossy(&self, event: LithosEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

//! Read-only query surface for external pollers
//!
//! Wraps the tracker in a transport-free adapter: the HTTP layer owns
//! routing and wire formats, this module only supplies serializable
//! snapshots. Every read is taken under the same lock as writers, so a
//! result is always a consistent point-in-time view, never a
//! partially-updated one.

use crate::alerts::AlertTracker;
use crate::events::{AlertDefinition, AlertEvent};
use serde::Serialize;
use std::sync::Arc;

/// Reply for a time-cursor poll
///
/// `generated_timestamp` is the server's current time; callers pass it
/// back as the cursor on their next poll. This is a pull-based diff
/// cursor, no per-client state is kept.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventsSince {
    /// Events with `timestamp > cursor`, oldest first
    pub events: Vec<AlertEvent>,
    /// Server time in unix seconds, the caller's next cursor
    pub generated_timestamp: i64,
}

/// Read-only view over a shared [`AlertTracker`]
pub struct AlertQuery {
    tracker: Arc<AlertTracker>,
}

impl AlertQuery {
    pub fn new(tracker: Arc<AlertTracker>) -> Self {
        Self { tracker }
    }

    /// All alert definitions, in registration order
    pub fn definitions(&self) -> Vec<AlertDefinition> {
        self.tracker.snapshot_definitions()
    }

    /// The full current backlog, oldest first
    pub fn all_events(&self) -> Vec<AlertEvent> {
        self.tracker.snapshot_events()
    }

    /// Events strictly newer than the supplied cursor timestamp
    pub fn events_since(&self, cursor: i64) -> EventsSince {
        let (events, generated_timestamp) = self.tracker.snapshot_events_since(cursor);
        EventsSince {
            events,
            generated_timestamp,
        }
    }
}

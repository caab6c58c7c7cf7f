//! Core alert types for the rate-governance tracker
//!
//! This module defines the fundamental data structures shared across the
//! crate: the coarse time-granularity table, alert type definitions with
//! their live throttle counters, and the immutable event records kept in
//! the backlog.

use serde::{Deserialize, Serialize};

/// Stable integer identifier for a registered alert type
///
/// Assigned sequentially starting at 0, never reused or reassigned for
/// the lifetime of the process.
pub type AlertRef = u32;

/// Monotonic identifier for an accepted alert event
///
/// Processing contexts hold these ids as a non-owning relation to events
/// in the backlog; the backlog remains the sole owner of the event data.
pub type EventId = u64;

/// Coarse time granularity for rate-limit windows
///
/// Ordered from finest to coarsest, so `burst_unit <= sustained_unit`
/// expresses "the burst window is the same or a finer granularity".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One second
    Second,
    /// One minute
    Minute,
    /// One hour
    Hour,
    /// One day
    Day,
}

impl TimeUnit {
    /// Duration of this granularity in seconds
    pub fn seconds(self) -> i64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3600,
            TimeUnit::Day => 86400,
        }
    }
}

/// A registered alert type with its rate-limit configuration and live counters
///
/// Created once by the registry, mutated continuously by the rate limiter
/// commit path, never deleted for the process lifetime. The `header` is
/// stored in uppercase; direct lookups match against that uppercase
/// keyspace with the caller's exact casing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertDefinition {
    /// Sequential identifier assigned at registration
    pub alert_ref: AlertRef,
    /// Canonical display name, normalized to uppercase
    pub header: String,
    /// Human-readable description of the alert type
    pub description: String,
    /// Originating subsystem the alert pertains to; opaque to this crate
    pub category: String,
    /// Granularity of the long-run throttle window
    pub sustained_unit: TimeUnit,
    /// Max events per sustained window; 0 means unlimited
    pub sustained_limit: u32,
    /// Granularity of the short-spike sub-window, same or finer than sustained
    pub burst_unit: TimeUnit,
    /// Max events per burst window
    pub burst_limit: u32,
    /// Unix seconds of the most recent accepted event, 0 if never fired
    pub last_emit_time: i64,
    /// Events accepted in the current sustained window
    pub sustained_count: u32,
    /// Events accepted in the current burst window
    pub burst_count: u32,
}

/// Opaque subject-identifier fields attached to an event
///
/// The tracker treats these as addressing tokens only; their format and
/// comparison semantics belong to the detectors that supply them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventSubjects {
    /// Primary subject the event is about
    pub origin: String,
    /// Source address of the observed traffic
    pub source: String,
    /// Destination address of the observed traffic
    pub dest: String,
    /// Any additional related address
    pub other: String,
}

/// A single accepted alert occurrence
///
/// Immutable after creation and owned exclusively by the backlog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertEvent {
    /// Monotonic id used as the non-owning relation key for contexts
    pub event_id: EventId,
    /// Header of the alert type that fired, uppercase
    pub header: String,
    /// Category copied from the definition
    pub category: String,
    /// Unix seconds at acceptance
    pub timestamp: i64,
    /// Opaque addressing tokens supplied by the detector
    pub subjects: EventSubjects,
    /// Free-form descriptor of the medium the event was observed on
    pub channel: String,
    /// Human-readable detail text
    pub text: String,
}

/// Outcome of a dispatch attempt
///
/// `Suppressed` is expected steady-state behavior under load, not an
/// error, and `UnknownType` is an ordinary not-found result; neither is
/// ever surfaced as a panic or logged as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaiseOutcome {
    /// The event was accepted, recorded and published
    Created,
    /// The rate limit is currently exceeded; nothing was recorded
    Suppressed,
    /// The alert ref is not registered
    UnknownType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_unit_seconds() {
        assert_eq!(TimeUnit::Second.seconds(), 1);
        assert_eq!(TimeUnit::Minute.seconds(), 60);
        assert_eq!(TimeUnit::Hour.seconds(), 3600);
        assert_eq!(TimeUnit::Day.seconds(), 86400);
    }

    #[test]
    fn test_time_unit_ordering() {
        assert!(TimeUnit::Second < TimeUnit::Minute);
        assert!(TimeUnit::Minute < TimeUnit::Hour);
        assert!(TimeUnit::Hour < TimeUnit::Day);
    }

    #[test]
    fn test_time_unit_serialization() {
        assert_eq!(
            serde_json::to_string(&TimeUnit::Second).unwrap(),
            "\"second\""
        );
        assert_eq!(serde_json::to_string(&TimeUnit::Day).unwrap(), "\"day\"");
    }

    #[test]
    fn test_alert_event_serialization() {
        let event = AlertEvent {
            event_id: 7,
            header: "SCANDETECT".to_string(),
            category: "net".to_string(),
            timestamp: 1700000000,
            subjects: EventSubjects {
                origin: "10.0.0.1".to_string(),
                source: "10.0.0.2".to_string(),
                dest: "10.0.0.3".to_string(),
                other: String::new(),
            },
            channel: "eth0".to_string(),
            text: "Port scan observed".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: AlertEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_alert_definition_serialization() {
        let def = AlertDefinition {
            alert_ref: 0,
            header: "SCANDETECT".to_string(),
            description: "Port scan detection".to_string(),
            category: "net".to_string(),
            sustained_unit: TimeUnit::Minute,
            sustained_limit: 5,
            burst_unit: TimeUnit::Second,
            burst_limit: 2,
            last_emit_time: 0,
            sustained_count: 0,
            burst_count: 0,
        };

        let json = serde_json::to_string(&def).unwrap();
        let deserialized: AlertDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, deserialized);
    }
}

//! Alert tracker: registration, activation and dispatch
//!
//! The tracker owns the whole mutable alert state (registry, backlog and
//! the configured activation templates) behind a single mutex. Every
//! public operation takes the lock for its full duration, so writers and
//! query snapshots always observe a consistent point-in-time view. No
//! operation blocks or performs I/O while holding the lock; publishing an
//! accepted alert is an in-memory format plus a log-macro write.

use crate::alerts::backlog::AlertBacklog;
use crate::alerts::rate_limiter;
use crate::alerts::registry::AlertRegistry;
use crate::config::AlertConfig;
use crate::error::RegistrationError;
use crate::events::{
    AlertDefinition, AlertEvent, AlertRef, EventId, EventSubjects, RaiseOutcome, TimeUnit,
};
use chrono::Utc;
use log::info;
use std::sync::Mutex;

/// Outbound message-bus collaborator
///
/// Receives one formatted line per accepted alert, fire-and-forget; no
/// return value is consumed.
#[cfg_attr(test, mockall::automock)]
pub trait MessageBus: Send + Sync {
    fn publish_alert(&self, text: &str);
}

/// Default bus that emits accepted alerts as alert-tagged log lines
#[derive(Debug, Default)]
pub struct LogMessageBus;

impl MessageBus for LogMessageBus {
    fn publish_alert(&self, text: &str) {
        info!(target: "alert", "{}", text);
    }
}

/// Inbound processing-context collaborator
///
/// A unit of work being analyzed (a packet, a capture slice) may collect
/// the ids of alerts raised against it. The context never owns the
/// events; the ids are a plain relation into the backlog and the context
/// must never cause an event's destruction.
pub trait AlertContext {
    /// Attach a non-owning reference to an accepted event
    fn attach_alert(&mut self, event_id: EventId);
}

/// Minimal context for callers without their own unit-of-work type
#[derive(Debug, Default)]
pub struct AttachedAlerts {
    ids: Vec<EventId>,
}

impl AttachedAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event ids attached so far, in acceptance order
    pub fn event_ids(&self) -> &[EventId] {
        &self.ids
    }
}

impl AlertContext for AttachedAlerts {
    fn attach_alert(&mut self, event_id: EventId) {
        self.ids.push(event_id);
    }
}

/// All mutable state behind the tracker's single lock
#[derive(Debug)]
struct TrackerState {
    registry: AlertRegistry,
    backlog: AlertBacklog,
    config: AlertConfig,
    next_event_id: EventId,
}

/// The alert rate-governance core
///
/// Construct once at startup from a validated [`AlertConfig`], then share
/// by reference (or `Arc`) with every detector and the query layer.
pub struct AlertTracker {
    state: Mutex<TrackerState>,
    bus: Box<dyn MessageBus>,
}

impl AlertTracker {
    /// Create a tracker publishing accepted alerts through [`LogMessageBus`]
    pub fn new(config: AlertConfig) -> Self {
        Self::with_bus(config, Box::new(LogMessageBus))
    }

    /// Create a tracker with a caller-supplied message bus
    pub fn with_bus(config: AlertConfig, bus: Box<dyn MessageBus>) -> Self {
        let backlog = AlertBacklog::new(config.backlog_capacity());
        Self {
            state: Mutex::new(TrackerState {
                registry: AlertRegistry::new(),
                backlog,
                config,
                next_event_id: 0,
            }),
            bus,
        }
    }

    /// Register a new alert type, returning its ref
    ///
    /// See [`AlertRegistry::register_alert`] for the header normalization
    /// and limit validation rules.
    #[allow(clippy::too_many_arguments)]
    pub fn register_alert(
        &self,
        header: &str,
        description: &str,
        sustained_unit: TimeUnit,
        sustained_limit: u32,
        burst_unit: TimeUnit,
        burst_limit: u32,
        category: &str,
    ) -> Result<AlertRef, RegistrationError> {
        let mut state = self.state.lock().unwrap();
        state.registry.register_alert(
            header,
            description,
            sustained_unit,
            sustained_limit,
            burst_unit,
            burst_limit,
            category,
        )
    }

    /// Exact-match ref lookup against the uppercase header keyspace
    pub fn lookup_ref(&self, header: &str) -> Option<AlertRef> {
        let state = self.state.lock().unwrap();
        state.registry.lookup_ref(header)
    }

    /// Activate an alert type whose limits were supplied by configuration
    ///
    /// The header is lowercased and matched against the configured
    /// template table. A miss means the type stays permanently inactive;
    /// that is ordinary startup behavior, reported at info level, not an
    /// error. A hit registers the type with the template's limits.
    pub fn activate_configured_alert(
        &self,
        header: &str,
        description: &str,
        category: &str,
    ) -> Result<Option<AlertRef>, RegistrationError> {
        let mut state = self.state.lock().unwrap();

        let template = match state.config.template(&header.to_ascii_lowercase()) {
            Some(template) => template.clone(),
            None => {
                info!(
                    "Alert type {} not found in the list of configured alerts",
                    header
                );
                return Ok(None);
            }
        };

        state
            .registry
            .register_alert(
                &template.header,
                description,
                template.sustained_unit,
                template.sustained_limit,
                template.burst_unit,
                template.burst_limit,
                category,
            )
            .map(Some)
    }

    /// Probe whether an alert of this type would currently be accepted
    ///
    /// Never mutates counters; lets detectors skip building an expensive
    /// event when it would only be suppressed. Unknown refs probe false.
    pub fn probe_alert(&self, alert_ref: AlertRef) -> bool {
        let state = self.state.lock().unwrap();
        match state.registry.definition(alert_ref) {
            Some(def) => rate_limiter::can_emit(def, unix_now()),
            None => false,
        }
    }

    /// Raise an alert of the given type at the current wall-clock time
    ///
    /// On acceptance the event is recorded in the backlog (evicting the
    /// oldest entry past capacity), its id is attached to the optional
    /// processing context, and `header + " " + text` is published to the
    /// message bus. Suppression and unknown refs are ordinary outcomes:
    /// nothing is constructed, mutated or logged for them.
    pub fn raise_alert(
        &self,
        alert_ref: AlertRef,
        context: Option<&mut dyn AlertContext>,
        subjects: EventSubjects,
        channel: &str,
        text: &str,
    ) -> RaiseOutcome {
        self.raise_alert_at(alert_ref, context, subjects, channel, text, unix_now())
    }

    /// Raise an alert at a specific unix-seconds timestamp
    ///
    /// This is primarily used for testing with controlled timestamps.
    pub fn raise_alert_at(
        &self,
        alert_ref: AlertRef,
        context: Option<&mut dyn AlertContext>,
        subjects: EventSubjects,
        channel: &str,
        text: &str,
        now: i64,
    ) -> RaiseOutcome {
        let mut state = self.state.lock().unwrap();

        let (header, category) = match state.registry.definition(alert_ref) {
            Some(def) if rate_limiter::can_emit(def, now) => {
                (def.header.clone(), def.category.clone())
            }
            Some(_) => return RaiseOutcome::Suppressed,
            None => return RaiseOutcome::UnknownType,
        };

        let event_id = state.next_event_id;
        state.next_event_id += 1;

        let event = AlertEvent {
            event_id,
            header,
            category,
            timestamp: now,
            subjects,
            channel: channel.to_string(),
            text: text.to_string(),
        };
        let notice = format!("{} {}", event.header, event.text);

        if let Some(def) = state.registry.definition_mut(alert_ref) {
            rate_limiter::record_emit(def, now);
        }
        state.backlog.push(event);

        if let Some(context) = context {
            context.attach_alert(event_id);
        }

        self.bus.publish_alert(&notice);

        RaiseOutcome::Created
    }

    /// Consistent snapshot of all definitions, in registration order
    pub(crate) fn snapshot_definitions(&self) -> Vec<AlertDefinition> {
        let state = self.state.lock().unwrap();
        state.registry.definitions().to_vec()
    }

    /// Consistent snapshot of the full backlog, oldest first
    pub(crate) fn snapshot_events(&self) -> Vec<AlertEvent> {
        let state = self.state.lock().unwrap();
        state.backlog.iter().cloned().collect()
    }

    /// Events strictly newer than `cursor`, plus the current server time
    /// for the caller's next poll
    pub(crate) fn snapshot_events_since(&self, cursor: i64) -> (Vec<AlertEvent>, i64) {
        let state = self.state.lock().unwrap();
        let events = state
            .backlog
            .iter()
            .filter(|event| event.timestamp > cursor)
            .cloned()
            .collect();
        (events, unix_now())
    }
}

/// Current wall-clock time in unix seconds
fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Error types for the alert tracker
pub mod error;

/// Core alert data types
pub mod events;

/// Startup alert directive parsing
pub mod config;

/// Registry, rate limiter, backlog and dispatch
pub mod alerts;

/// Read-only query surface
pub mod query;

// Re-export commonly used types
pub use alerts::{AlertContext, AlertTracker, AttachedAlerts, LogMessageBus, MessageBus};
pub use config::{AlertConfig, ConfiguredAlertTemplate};
pub use error::{ConfigError, RegistrationError};
pub use events::{
    AlertDefinition, AlertEvent, AlertRef, EventId, EventSubjects, RaiseOutcome, TimeUnit,
};
pub use query::{AlertQuery, EventsSince};

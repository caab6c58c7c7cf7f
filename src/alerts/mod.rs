/// Bounded event backlog
pub mod backlog;
/// Dual-window rate limiting decisions
pub mod rate_limiter;
/// Alert type registry
pub mod registry;
/// Dispatch, activation and the shared-state guard
pub mod tracker;

pub use backlog::AlertBacklog;
pub use registry::AlertRegistry;
pub use tracker::{AlertContext, AlertTracker, AttachedAlerts, LogMessageBus, MessageBus};

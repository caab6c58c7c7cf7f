use thiserror::Error;

/// Errors that can occur while parsing startup alert directives
///
/// All of these are fatal: a silently-missing or malformed throttle is
/// worse than refusing to start, so the process must halt before serving.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed alert directive '{0}': expected header,rate[/unit],burst[/unit]")]
    MalformedDirective(String),

    #[error("Invalid time unit '{0}' for alert rate")]
    InvalidUnit(String),

    #[error("Invalid rate '{0}' for alert")]
    InvalidRate(String),

    #[error("Illegal value '{0}' for alert backlog capacity")]
    InvalidBacklog(String),
}

/// Errors that can occur when registering an alert type
///
/// These are logged and returned to the caller; the registry is left
/// unchanged in both cases.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Alert type '{0}' is already registered")]
    DuplicateRegistration(String),

    #[error("Burst time unit for alert '{0}' must be the same or finer than the sustained time unit")]
    InvalidLimitConfiguration(String),
}

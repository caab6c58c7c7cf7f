//! Startup alert directive parsing
//!
//! Alert throttles arrive as repeatable `header,rate[/unit],burst[/unit]`
//! directives plus an optional backlog capacity. Parsing happens once at
//! startup and any malformed directive is fatal: the process refuses to
//! run with a partially-loaded alert policy.

use crate::error::ConfigError;
use crate::events::TimeUnit;
use std::collections::HashMap;

/// Backlog capacity used when no `alert-backlog` value is configured
pub const DEFAULT_BACKLOG_CAPACITY: usize = 50;

/// Per-type throttle limits parsed from one `alert=` directive
///
/// Keyed in [`AlertConfig`] by the lowercased header; consumed, never
/// mutated, when a detector activates the type by name. This lowercase
/// namespace is deliberately independent from the live registry's
/// uppercase keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredAlertTemplate {
    /// Header as configured, lowercased
    pub header: String,
    /// Granularity of the sustained window
    pub sustained_unit: TimeUnit,
    /// Max events per sustained window; 0 means unlimited
    pub sustained_limit: u32,
    /// Granularity of the burst window
    pub burst_unit: TimeUnit,
    /// Max events per burst window
    pub burst_limit: u32,
}

/// Parsed startup configuration for the alert tracker
///
/// Holds the activation template table and the backlog capacity.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    templates: HashMap<String, ConfiguredAlertTemplate>,
    backlog_capacity: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            templates: HashMap::new(),
            backlog_capacity: DEFAULT_BACKLOG_CAPACITY,
        }
    }
}

impl AlertConfig {
    /// Parse the repeatable alert directives and the backlog capacity
    ///
    /// A directive configured twice for the same header keeps the last
    /// occurrence. `backlog` is the raw configured string so that
    /// non-numeric input surfaces as a [`ConfigError`] here rather than
    /// at the argument-parsing layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for any malformed directive or an invalid
    /// backlog value; callers must treat this as fatal.
    pub fn from_directives(alerts: &[String], backlog: Option<&str>) -> Result<Self, ConfigError> {
        let mut templates = HashMap::new();
        for directive in alerts {
            let template = parse_alert_directive(directive)?;
            templates.insert(template.header.clone(), template);
        }

        let backlog_capacity = match backlog {
            Some(value) => parse_backlog(value)?,
            None => DEFAULT_BACKLOG_CAPACITY,
        };

        Ok(Self {
            templates,
            backlog_capacity,
        })
    }

    /// Look up a template by its lowercased header key
    pub fn template(&self, lowered_header: &str) -> Option<&ConfiguredAlertTemplate> {
        self.templates.get(lowered_header)
    }

    /// Number of configured templates
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Configured headers, sorted for deterministic iteration
    pub fn template_headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = self.templates.keys().cloned().collect();
        headers.sort();
        headers
    }

    /// Maximum number of events the backlog may retain
    pub fn backlog_capacity(&self) -> usize {
        self.backlog_capacity
    }
}

/// Parse one `header,rate[/unit],burst[/unit]` directive
///
/// The header is lowercased for the template table key; rate units
/// default to per-minute when omitted.
///
/// # Errors
///
/// Returns `ConfigError::MalformedDirective` for a wrong field count or
/// empty header, and propagates unit/rate errors from the rate fields.
pub fn parse_alert_directive(directive: &str) -> Result<ConfiguredAlertTemplate, ConfigError> {
    let tokens: Vec<&str> = directive.split(',').collect();
    if tokens.len() != 3 {
        return Err(ConfigError::MalformedDirective(directive.to_string()));
    }

    let header = tokens[0].trim().to_ascii_lowercase();
    if header.is_empty() {
        return Err(ConfigError::MalformedDirective(directive.to_string()));
    }

    let (sustained_unit, sustained_limit) = parse_rate_unit(tokens[1].trim())?;
    let (burst_unit, burst_limit) = parse_rate_unit(tokens[2].trim())?;

    Ok(ConfiguredAlertTemplate {
        header,
        sustained_unit,
        sustained_limit,
        burst_unit,
        burst_limit,
    })
}

/// Split a `rate[/unit]` field into its numeric rate and time unit
fn parse_rate_unit(field: &str) -> Result<(TimeUnit, u32), ConfigError> {
    let mut parts = field.splitn(2, '/');
    let rate_str = parts.next().unwrap_or_default().trim();

    let unit = match parts.next() {
        // Unit is per minute if not specified
        None => TimeUnit::Minute,
        Some(unit_str) => match unit_str.trim().to_ascii_lowercase().as_str() {
            "sec" | "second" => TimeUnit::Second,
            "min" | "minute" => TimeUnit::Minute,
            "hr" | "hour" => TimeUnit::Hour,
            "day" => TimeUnit::Day,
            other => return Err(ConfigError::InvalidUnit(other.to_string())),
        },
    };

    let rate = rate_str
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidRate(rate_str.to_string()))?;

    Ok((unit, rate))
}

/// Parse the backlog capacity value; negative or non-numeric input is fatal
fn parse_backlog(value: &str) -> Result<usize, ConfigError> {
    let capacity = value
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidBacklog(value.to_string()))?;

    if capacity < 0 {
        return Err(ConfigError::InvalidBacklog(value.to_string()));
    }

    Ok(capacity as usize)
}

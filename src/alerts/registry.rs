//! Alert type registry
//!
//! Owns every registered [`AlertDefinition`] for the process lifetime.
//! Headers are normalized to uppercase for storage and duplicate
//! detection; refs are assigned sequentially starting at 0 and double as
//! the index into the definition list.

use crate::error::RegistrationError;
use crate::events::{AlertDefinition, AlertRef, TimeUnit};
use log::error;
use std::collections::HashMap;

/// Registry of alert type definitions and their live counters
#[derive(Debug, Default)]
pub struct AlertRegistry {
    /// Definitions indexed by their ref
    definitions: Vec<AlertDefinition>,
    /// Uppercase header -> ref
    name_map: HashMap<String, AlertRef>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new alert type and return its ref
    ///
    /// The header is stored uppercase and must be unique; the burst unit
    /// must be the same or a finer granularity than the sustained unit.
    /// Failures are logged, leave the registry unchanged and are returned
    /// to the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn register_alert(
        &mut self,
        header: &str,
        description: &str,
        sustained_unit: TimeUnit,
        sustained_limit: u32,
        burst_unit: TimeUnit,
        burst_limit: u32,
        category: &str,
    ) -> Result<AlertRef, RegistrationError> {
        let normalized = header.to_ascii_uppercase();

        if self.name_map.contains_key(&normalized) {
            error!("Tried to re-register duplicate alert {}", header);
            return Err(RegistrationError::DuplicateRegistration(header.to_string()));
        }

        if burst_unit > sustained_unit {
            error!(
                "Failed to register alert {}: burst time unit must be the same \
                 or finer than the sustained time unit",
                header
            );
            return Err(RegistrationError::InvalidLimitConfiguration(
                header.to_string(),
            ));
        }

        let alert_ref = self.definitions.len() as AlertRef;
        self.name_map.insert(normalized.clone(), alert_ref);
        self.definitions.push(AlertDefinition {
            alert_ref,
            header: normalized,
            description: description.to_string(),
            category: category.to_string(),
            sustained_unit,
            sustained_limit,
            burst_unit,
            burst_limit,
            last_emit_time: 0,
            sustained_count: 0,
            burst_count: 0,
        });

        Ok(alert_ref)
    }

    /// Exact-match lookup against the uppercase header keyspace
    ///
    /// The caller's casing is used as-is: `lookup_ref("scandetect")`
    /// misses a type registered as `SCANDETECT`.
    pub fn lookup_ref(&self, header: &str) -> Option<AlertRef> {
        self.name_map.get(header).copied()
    }

    pub fn definition(&self, alert_ref: AlertRef) -> Option<&AlertDefinition> {
        self.definitions.get(alert_ref as usize)
    }

    pub fn definition_mut(&mut self, alert_ref: AlertRef) -> Option<&mut AlertDefinition> {
        self.definitions.get_mut(alert_ref as usize)
    }

    /// All definitions in registration order
    pub fn definitions(&self) -> &[AlertDefinition] {
        &self.definitions
    }
}

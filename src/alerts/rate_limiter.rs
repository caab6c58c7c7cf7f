//! Dual-window rate limiting decisions
//!
//! The limiter governs one alert definition with two nested windows: a
//! coarse sustained window bounding long-run throughput and a finer burst
//! window bounding short spikes inside it. The probe ([`can_emit`]) is a
//! pure read so callers can test eligibility before building an event;
//! the commit ([`record_emit`]) is invoked only on acceptance.

use crate::events::AlertDefinition;

/// Decide whether a definition may emit at time `now` (unix seconds)
///
/// Strictly read-only: the definition's counters and `last_emit_time` are
/// never touched, no matter how often this is called.
///
/// A sustained limit of 0 means the type is unlimited. When the whole
/// sustained window has elapsed since the last emit, both windows are
/// considered empty; when only the burst window has elapsed, the burst
/// counter is considered empty but the sustained count still applies.
pub fn can_emit(def: &AlertDefinition, now: i64) -> bool {
    if def.sustained_limit == 0 {
        return true;
    }

    if now - def.last_emit_time >= def.sustained_unit.seconds() {
        return true;
    }

    let burst_count = if now - def.last_emit_time >= def.burst_unit.seconds() {
        0
    } else {
        def.burst_count
    };

    burst_count < def.burst_limit && def.sustained_count < def.sustained_limit
}

/// Commit an accepted emit at time `now`
///
/// Applies the window resets the probe anticipated, increments both
/// counters and stamps `last_emit_time`. Unlimited types (sustained limit
/// 0) are left entirely untouched so an unbounded stream of events never
/// accumulates state.
pub fn record_emit(def: &mut AlertDefinition, now: i64) {
    if def.sustained_limit == 0 {
        return;
    }

    if now - def.last_emit_time >= def.sustained_unit.seconds() {
        def.sustained_count = 0;
        def.burst_count = 0;
    } else if now - def.last_emit_time >= def.burst_unit.seconds() {
        // Sustained count persists across the burst boundary
        def.burst_count = 0;
    }

    def.sustained_count += 1;
    def.burst_count += 1;
    def.last_emit_time = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TimeUnit;

    fn test_definition(sustained_limit: u32, burst_limit: u32) -> AlertDefinition {
        AlertDefinition {
            alert_ref: 0,
            header: "TESTALERT".to_string(),
            description: "Test alert".to_string(),
            category: "test".to_string(),
            sustained_unit: TimeUnit::Minute,
            sustained_limit,
            burst_unit: TimeUnit::Second,
            burst_limit,
            last_emit_time: 0,
            sustained_count: 0,
            burst_count: 0,
        }
    }

    #[test]
    fn test_unlimited_type_always_allowed_and_untouched() {
        let mut def = test_definition(0, 0);
        let before = def.clone();

        for i in 0..1000 {
            assert!(can_emit(&def, 1000 + i));
            record_emit(&mut def, 1000 + i);
        }

        assert_eq!(def, before);
    }

    #[test]
    fn test_burst_limit_within_same_second() {
        let mut def = test_definition(5, 2);
        let now = 1000;

        assert!(can_emit(&def, now));
        record_emit(&mut def, now);
        assert!(can_emit(&def, now));
        record_emit(&mut def, now);

        // Third event in the same second exceeds the burst window
        assert!(!can_emit(&def, now));
        assert_eq!(def.sustained_count, 2);
        assert_eq!(def.burst_count, 2);
    }

    #[test]
    fn test_burst_window_reset_preserves_sustained_count() {
        let mut def = test_definition(5, 2);

        record_emit(&mut def, 1000);
        record_emit(&mut def, 1000);
        assert!(!can_emit(&def, 1000));

        // One second later the burst window expired but the sustained
        // window has not
        assert!(can_emit(&def, 1001));
        record_emit(&mut def, 1001);
        assert_eq!(def.sustained_count, 3);
        assert_eq!(def.burst_count, 1);
    }

    #[test]
    fn test_sustained_limit_denies_after_burst_resets() {
        let mut def = test_definition(3, 2);

        record_emit(&mut def, 1000);
        record_emit(&mut def, 1000);
        record_emit(&mut def, 1001);

        // Burst window expired again, but the sustained window is full
        assert!(!can_emit(&def, 1002));
        assert_eq!(def.sustained_count, 3);
    }

    #[test]
    fn test_sustained_window_expiry_resets_both_counters() {
        let mut def = test_definition(3, 2);

        record_emit(&mut def, 1000);
        record_emit(&mut def, 1000);
        record_emit(&mut def, 1001);
        assert!(!can_emit(&def, 1002));

        // A full minute after the last emit everything resets
        assert!(can_emit(&def, 1061));
        record_emit(&mut def, 1061);
        assert_eq!(def.sustained_count, 1);
        assert_eq!(def.burst_count, 1);
    }

    #[test]
    fn test_first_emit_allowed_from_zero_state() {
        let def = test_definition(1, 1);
        assert!(can_emit(&def, 1));
    }

    #[test]
    fn test_probe_never_mutates() {
        let mut def = test_definition(5, 2);
        record_emit(&mut def, 1000);
        let snapshot = def.clone();

        for now in [1000, 1001, 1060, 1100] {
            can_emit(&def, now);
        }

        assert_eq!(def, snapshot);
    }
}

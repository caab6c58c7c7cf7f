//! Bounded alert event backlog
//!
//! Insertion-ordered history of accepted events with a capacity fixed at
//! startup. Overflow evicts the oldest entry atomically with the insert;
//! eviction is the only way an event is ever deleted.

use crate::events::AlertEvent;
use std::collections::VecDeque;

/// FIFO-evicted history of accepted alert events
#[derive(Debug)]
pub struct AlertBacklog {
    events: VecDeque<AlertEvent>,
    capacity: usize,
}

impl AlertBacklog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event, evicting the oldest entries past capacity
    pub fn push(&mut self, event: AlertEvent) {
        self.events.push_back(event);
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate events oldest first
    pub fn iter(&self) -> impl Iterator<Item = &AlertEvent> {
        self.events.iter()
    }
}


// Property-based tests
#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::events::EventSubjects;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    #[derive(Debug, Clone)]
    struct BacklogCapacity(usize);

    impl Arbitrary for BacklogCapacity {
        fn arbitrary(g: &mut Gen) -> Self {
            BacklogCapacity((u8::arbitrary(g) % 50 + 1) as usize)
        }
    }

    #[derive(Debug, Clone)]
    struct EventCount(usize);

    impl Arbitrary for EventCount {
        fn arbitrary(g: &mut Gen) -> Self {
            EventCount((u8::arbitrary(g) % 150 + 1) as usize)
        }
    }

    // Length never exceeds capacity and the retained window is exactly
    // the most recent min(count, capacity) events in insertion order
    #[quickcheck]
    fn prop_backlog_bounded_and_fifo(capacity: BacklogCapacity, count: EventCount) -> bool {
        let mut backlog = AlertBacklog::new(capacity.0);

        for i in 0..count.0 {
            backlog.push(AlertEvent {
                event_id: i as u64,
                header: "PROP".to_string(),
                category: String::new(),
                timestamp: 1000 + i as i64,
                subjects: EventSubjects::default(),
                channel: String::new(),
                text: String::new(),
            });
            if backlog.len() > capacity.0 {
                return false;
            }
        }

        let expected_len = count.0.min(capacity.0);
        let first_retained = (count.0 - expected_len) as u64;
        let ids: Vec<u64> = backlog.iter().map(|e| e.event_id).collect();
        let expected: Vec<u64> = (first_retained..count.0 as u64).collect();

        backlog.len() == expected_len && ids == expected
    }
}

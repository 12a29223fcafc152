//! Interval derivation
//!
//! Turns the transition history of one service into contiguous,
//! non-overlapping intervals. The transform itself is a pure function.

use std::sync::Arc;

use crate::error::MonitorResult;
use crate::event_store::StateStore;
use crate::types::{Interval, Transition};

/// Derive intervals from a service's transitions
///
/// Each transition opens an interval that ends where the next one starts;
/// the last interval stays open. Input is ordered by timestamp first (stable,
/// so equal timestamps keep their given order).
pub fn derive_intervals(transitions: &[Transition]) -> Vec<Interval> {
    let mut ordered: Vec<&Transition> = transitions.iter().collect();
    ordered.sort_by_key(|t| t.timestamp);

    ordered
        .iter()
        .enumerate()
        .map(|(i, t)| Interval {
            service_name: t.service_name.clone(),
            state: t.state.clone(),
            start_time: t.timestamp,
            end_time: ordered.get(i + 1).map(|next| next.timestamp),
        })
        .collect()
}

/// Reads a service's transitions and derives its intervals
pub struct IntervalDeriver {
    store: Arc<dyn StateStore>,
}

impl IntervalDeriver {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Intervals for `service_name`; empty for an unknown service
    pub fn intervals(&self, service_name: &str) -> MonitorResult<Vec<Interval>> {
        let transitions = self.store.all_transitions(service_name)?;
        Ok(derive_intervals(&transitions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transitions(items: &[(&str, i64)]) -> Vec<Transition> {
        items
            .iter()
            .map(|(state, ts)| Transition::new("web", *state, *ts))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_intervals(&[]).is_empty());
    }

    #[test]
    fn test_single_transition_is_open() {
        let intervals = derive_intervals(&transitions(&[("ok", 10)]));
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start_time, 10);
        assert!(intervals[0].is_open());
    }

    #[test]
    fn test_intervals_are_contiguous() {
        let intervals = derive_intervals(&transitions(&[
            ("issue", 100),
            ("deploy", 200),
            ("ok", 350),
            ("issue", 400),
        ]));

        assert_eq!(intervals.len(), 4);
        for pair in intervals.windows(2) {
            assert_eq!(pair[0].end_time, Some(pair[1].start_time));
        }
        assert_eq!(intervals[3].state, "issue");
        assert!(intervals[3].is_open());
        assert!(intervals[..3].iter().all(|i| !i.is_open()));
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let intervals = derive_intervals(&transitions(&[("deploy", 200), ("issue", 100)]));
        assert_eq!(intervals[0].state, "issue");
        assert_eq!(intervals[0].end_time, Some(200));
        assert_eq!(intervals[1].state, "deploy");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let input = transitions(&[("issue", 100), ("deploy", 200)]);
        assert_eq!(derive_intervals(&input), derive_intervals(&input));
    }

    #[test]
    fn test_deriver_reads_store() {
        use crate::event_store::MemoryStore;

        let store = Arc::new(MemoryStore::new());
        store
            .append_transition(&Transition::new("web", "issue", 100))
            .unwrap();
        store
            .append_transition(&Transition::new("web", "deploy", 200))
            .unwrap();

        let deriver = IntervalDeriver::new(store);
        let intervals = deriver.intervals("web").unwrap();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].end_time, Some(200));
        assert!(deriver.intervals("cache").unwrap().is_empty());
    }
}

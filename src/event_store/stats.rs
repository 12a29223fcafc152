//! Event store statistics

use serde::Serialize;

/// Counts of what a store currently holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Distinct services with at least one raw event
    pub service_count: usize,
    /// Raw events in the log
    pub event_count: usize,
    /// Transition records
    pub transition_count: usize,
}

impl StoreStats {
    /// Share of raw events that were suppressed as duplicates
    pub fn suppression_ratio(&self) -> f64 {
        if self.event_count == 0 {
            return 0.0;
        }
        let suppressed = self.event_count.saturating_sub(self.transition_count);
        suppressed as f64 / self.event_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppression_ratio() {
        let stats = StoreStats {
            service_count: 1,
            event_count: 4,
            transition_count: 1,
        };
        assert!((stats.suppression_ratio() - 0.75).abs() < f64::EPSILON);
        assert_eq!(StoreStats::default().suppression_ratio(), 0.0);
    }
}

//! Service Monitor - Core state engine
//!
//! Converts a stream of timestamped state events into a deduplicated
//! transition log, and answers current-state and history queries from it.
//!
//! - `tracker`: per-event transition decision, serialized per service
//! - `resolver`: latest state of every service
//! - `intervals`: transition history as contiguous intervals
//!
//! All components receive their [`StateStore`] at construction.

mod intervals;
mod locks;
mod resolver;
mod tracker;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::MonitorResult;
use crate::event_store::{StateStore, StoreStats};
use crate::types::{Event, Interval, ServiceSeen, Transition, TransitionOutcome};

pub use intervals::{derive_intervals, IntervalDeriver};
pub use resolver::CurrentStateResolver;
pub use tracker::{OrderingPolicy, TransitionTracker};

/// Facade over the tracker, resolver and interval deriver
pub struct ServiceMonitor {
    store: Arc<dyn StateStore>,
    tracker: TransitionTracker,
    resolver: CurrentStateResolver,
    deriver: IntervalDeriver,
}

impl ServiceMonitor {
    /// Create a monitor with the default ordering policy
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self::with_policy(store, OrderingPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn StateStore>, policy: OrderingPolicy) -> Self {
        Self {
            tracker: TransitionTracker::new(Arc::clone(&store), policy),
            resolver: CurrentStateResolver::new(Arc::clone(&store)),
            deriver: IntervalDeriver::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.tracker.policy()
    }

    /// Ingest one event (seconds since epoch)
    pub fn record_event(
        &self,
        service_name: &str,
        state: &str,
        timestamp: i64,
    ) -> MonitorResult<TransitionOutcome> {
        self.tracker.record(service_name, state, timestamp)
    }

    /// Ingest one event, handing a new transition to `on_transition` while
    /// the service is still locked
    pub fn record_event_with<F>(
        &self,
        service_name: &str,
        state: &str,
        timestamp: i64,
        on_transition: F,
    ) -> MonitorResult<TransitionOutcome>
    where
        F: FnOnce(&Transition),
    {
        self.tracker
            .record_with(service_name, state, timestamp, on_transition)
    }

    /// Latest state of every service with at least one transition
    pub fn latest_states(&self) -> MonitorResult<BTreeMap<String, ServiceSeen>> {
        self.resolver.latest_states()
    }

    /// State history of one service as intervals
    pub fn intervals(&self, service_name: &str) -> MonitorResult<Vec<Interval>> {
        self.deriver.intervals(service_name)
    }

    /// Raw events of one service, ordered by timestamp
    ///
    /// Like every query, an unknown name yields an empty list.
    pub fn events(&self, service_name: &str) -> MonitorResult<Vec<Event>> {
        Ok(self.store.events(service_name)?)
    }

    pub fn stats(&self) -> MonitorResult<StoreStats> {
        Ok(self.store.stats()?)
    }
}

//! Transition tracking
//!
//! Every event lands in the raw log. A transition is recorded only when the
//! event's state differs from the reference transition picked by the
//! [`OrderingPolicy`].

use std::str::FromStr;
use std::sync::Arc;

use crate::error::MonitorResult;
use crate::event_store::StateStore;
use crate::types::{Event, Transition, TransitionOutcome};
use crate::validation::validate_event_fields;

use super::locks::ServiceLocks;

/// Which transition an incoming event is compared against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// The chronologically latest transition of the service.
    ///
    /// A late event (older than the latest transition) whose state differs
    /// from the latest is still recorded, at its own timestamp. The
    /// transition log can then hold two adjacent entries with the same state.
    #[default]
    Latest,
    /// The transition that was current at the event's timestamp, i.e. the
    /// last one with `timestamp <= event.timestamp`. Existing transitions are
    /// never rewritten, so a late insert can still sit next to a later
    /// transition with the same state.
    NearestPreceding,
}

impl OrderingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderingPolicy::Latest => "latest",
            OrderingPolicy::NearestPreceding => "nearest_preceding",
        }
    }
}

impl FromStr for OrderingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(OrderingPolicy::Latest),
            "nearest_preceding" | "nearest-preceding" => Ok(OrderingPolicy::NearestPreceding),
            other => Err(format!(
                "unknown ordering policy '{}', expected 'latest' or 'nearest_preceding'",
                other
            )),
        }
    }
}

/// Decides, per event, whether a service's state changed
pub struct TransitionTracker {
    store: Arc<dyn StateStore>,
    locks: ServiceLocks,
    policy: OrderingPolicy,
}

impl TransitionTracker {
    pub fn new(store: Arc<dyn StateStore>, policy: OrderingPolicy) -> Self {
        Self {
            store,
            locks: ServiceLocks::new(),
            policy,
        }
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// Record one event and report whether it started a new transition
    ///
    /// The raw event is appended before the service lock is taken; the lock
    /// covers only the lookup of the reference transition and the
    /// conditional append.
    pub fn record(
        &self,
        service_name: &str,
        state: &str,
        timestamp: i64,
    ) -> MonitorResult<TransitionOutcome> {
        self.record_with(service_name, state, timestamp, |_| {})
    }

    /// Like [`record`](Self::record), calling `on_transition` with a new
    /// transition before the service lock is released
    ///
    /// Per service, `on_transition` therefore sees transitions in the order
    /// they were appended.
    pub fn record_with<F>(
        &self,
        service_name: &str,
        state: &str,
        timestamp: i64,
        on_transition: F,
    ) -> MonitorResult<TransitionOutcome>
    where
        F: FnOnce(&Transition),
    {
        validate_event_fields(service_name, state)?;

        let event = Event::new(service_name, state, timestamp);
        self.store.append_event(&event)?;

        let _guard = self.locks.lock(service_name);

        let reference = match self.policy {
            OrderingPolicy::Latest => self.store.latest_transition(service_name)?,
            OrderingPolicy::NearestPreceding => {
                self.store.transition_at(service_name, timestamp)?
            }
        };

        if let Some(previous) = &reference {
            if previous.state == state {
                tracing::debug!(
                    service = service_name,
                    state,
                    timestamp,
                    since = previous.timestamp,
                    "duplicate state suppressed"
                );
                return Ok(TransitionOutcome::DuplicateSuppressed);
            }
            if timestamp < previous.timestamp {
                tracing::warn!(
                    service = service_name,
                    state,
                    timestamp,
                    reference = previous.timestamp,
                    "event older than its reference transition"
                );
            }
        }

        let transition = Transition::from(&event);
        self.store.append_transition(&transition)?;

        tracing::info!(
            service = service_name,
            state,
            timestamp,
            previous = reference.as_ref().map(|t| t.state.as_str()),
            "recorded transition"
        );
        on_transition(&transition);

        Ok(TransitionOutcome::NewTransition(transition))
    }
}

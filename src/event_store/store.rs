//! Storage capability consumed by the monitor core

use crate::error::StoreResult;
use crate::types::{Event, Transition};

use super::StoreStats;

/// Append-only persistence for raw events and transitions
///
/// Implementations must order every per-service read by timestamp, never by
/// arrival order, and must accept events older than ones already stored.
/// Records with equal timestamps keep their append order.
pub trait StateStore: Send + Sync {
    /// Append a raw event to the log
    fn append_event(&self, event: &Event) -> StoreResult<()>;

    /// Append a transition record
    fn append_transition(&self, transition: &Transition) -> StoreResult<()>;

    /// The transition with the greatest timestamp for a service
    fn latest_transition(&self, service_name: &str) -> StoreResult<Option<Transition>>;

    /// The last transition with `timestamp <= at` for a service
    fn transition_at(&self, service_name: &str, at: i64) -> StoreResult<Option<Transition>>;

    /// All transitions for a service, ascending by timestamp
    fn all_transitions(&self, service_name: &str) -> StoreResult<Vec<Transition>>;

    /// The latest transition of every service that has one
    fn latest_transitions(&self) -> StoreResult<Vec<Transition>>;

    /// All raw events for a service, ascending by timestamp
    fn events(&self, service_name: &str) -> StoreResult<Vec<Event>>;

    /// Record counts
    fn stats(&self) -> StoreResult<StoreStats>;
}

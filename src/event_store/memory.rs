//! In-memory state store
//!
//! Used directly when no data directory is configured, as the substitute
//! store in tests, and as the transition index behind [`JsonlStore`](super::JsonlStore).

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::StoreResult;
use crate::types::{Event, Transition};

use super::{StateStore, StoreStats};

/// Records held for one service, each list sorted by timestamp
#[derive(Debug, Default)]
struct ServiceLog {
    events: Vec<Event>,
    transitions: Vec<Transition>,
}

/// Insert keeping `items` sorted by key; equal keys keep append order
fn insert_sorted<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> i64) {
    let ts = key(&item);
    let pos = items.partition_point(|existing| key(existing) <= ts);
    items.insert(pos, item);
}

/// Volatile store keyed by service name
#[derive(Debug, Default)]
pub struct MemoryStore {
    services: RwLock<HashMap<String, ServiceLog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_event(&self, event: Event) {
        let mut services = self.services.write();
        let log = services.entry(event.service_name.clone()).or_default();
        insert_sorted(&mut log.events, event, |e| e.timestamp);
    }

    pub(crate) fn insert_transition(&self, transition: Transition) {
        let mut services = self.services.write();
        let log = services.entry(transition.service_name.clone()).or_default();
        insert_sorted(&mut log.transitions, transition, |t| t.timestamp);
    }
}

impl StateStore for MemoryStore {
    fn append_event(&self, event: &Event) -> StoreResult<()> {
        self.insert_event(event.clone());
        Ok(())
    }

    fn append_transition(&self, transition: &Transition) -> StoreResult<()> {
        self.insert_transition(transition.clone());
        Ok(())
    }

    fn latest_transition(&self, service_name: &str) -> StoreResult<Option<Transition>> {
        let services = self.services.read();
        Ok(services
            .get(service_name)
            .and_then(|log| log.transitions.last().cloned()))
    }

    fn transition_at(&self, service_name: &str, at: i64) -> StoreResult<Option<Transition>> {
        let services = self.services.read();
        let Some(log) = services.get(service_name) else {
            return Ok(None);
        };
        let pos = log.transitions.partition_point(|t| t.timestamp <= at);
        Ok(pos.checked_sub(1).map(|i| log.transitions[i].clone()))
    }

    fn all_transitions(&self, service_name: &str) -> StoreResult<Vec<Transition>> {
        let services = self.services.read();
        Ok(services
            .get(service_name)
            .map(|log| log.transitions.clone())
            .unwrap_or_default())
    }

    fn latest_transitions(&self) -> StoreResult<Vec<Transition>> {
        let services = self.services.read();
        Ok(services
            .values()
            .filter_map(|log| log.transitions.last().cloned())
            .collect())
    }

    fn events(&self, service_name: &str) -> StoreResult<Vec<Event>> {
        let services = self.services.read();
        Ok(services
            .get(service_name)
            .map(|log| log.events.clone())
            .unwrap_or_default())
    }

    fn stats(&self) -> StoreResult<StoreStats> {
        let services = self.services.read();
        let mut stats = StoreStats::default();
        for log in services.values() {
            if !log.events.is_empty() {
                stats.service_count += 1;
            }
            stats.event_count += log.events.len();
            stats.transition_count += log.transitions.len();
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(service: &str, state: &str, ts: i64) -> Event {
        Event {
            service_name: service.to_string(),
            state: state.to_string(),
            timestamp: ts,
            received_at: 0,
        }
    }

    #[test]
    fn test_events_sorted_by_timestamp_not_arrival() {
        let store = MemoryStore::new();
        store.append_event(&event("web", "deploy", 200)).unwrap();
        store.append_event(&event("web", "issue", 100)).unwrap();
        store.append_event(&event("web", "ok", 150)).unwrap();

        let timestamps: Vec<i64> = store
            .events("web")
            .unwrap()
            .iter()
            .map(|e| e.timestamp)
            .collect();
        assert_eq!(timestamps, vec![100, 150, 200]);
    }

    #[test]
    fn test_latest_transition_is_chronological() {
        let store = MemoryStore::new();
        store
            .append_transition(&Transition::new("web", "deploy", 200))
            .unwrap();
        store
            .append_transition(&Transition::new("web", "issue", 100))
            .unwrap();

        let latest = store.latest_transition("web").unwrap().unwrap();
        assert_eq!(latest.state, "deploy");
        assert_eq!(latest.timestamp, 200);
    }

    #[test]
    fn test_equal_timestamps_keep_append_order() {
        let store = MemoryStore::new();
        store
            .append_transition(&Transition::new("web", "issue", 100))
            .unwrap();
        store
            .append_transition(&Transition::new("web", "ok", 100))
            .unwrap();

        assert_eq!(store.latest_transition("web").unwrap().unwrap().state, "ok");
        assert_eq!(store.transition_at("web", 100).unwrap().unwrap().state, "ok");
    }

    #[test]
    fn test_transition_at_finds_nearest_preceding() {
        let store = MemoryStore::new();
        for (state, ts) in [("issue", 100), ("deploy", 200), ("ok", 300)] {
            store
                .append_transition(&Transition::new("web", state, ts))
                .unwrap();
        }

        assert!(store.transition_at("web", 99).unwrap().is_none());
        assert_eq!(store.transition_at("web", 100).unwrap().unwrap().state, "issue");
        assert_eq!(store.transition_at("web", 250).unwrap().unwrap().state, "deploy");
        assert_eq!(store.transition_at("web", 1_000).unwrap().unwrap().state, "ok");
        assert!(store.transition_at("cache", 1_000).unwrap().is_none());
    }

    #[test]
    fn test_latest_transitions_one_per_service() {
        let store = MemoryStore::new();
        store
            .append_transition(&Transition::new("web", "issue", 100))
            .unwrap();
        store
            .append_transition(&Transition::new("web", "deploy", 200))
            .unwrap();
        store
            .append_transition(&Transition::new("cache", "ok", 50))
            .unwrap();
        // Events alone do not make a service visible to the resolver
        store.append_event(&event("database", "ok", 10)).unwrap();

        let mut latest = store.latest_transitions().unwrap();
        latest.sort_by(|a, b| a.service_name.cmp(&b.service_name));
        assert_eq!(
            latest,
            vec![
                Transition::new("cache", "ok", 50),
                Transition::new("web", "deploy", 200),
            ]
        );
    }

    #[test]
    fn test_unknown_service_is_empty() {
        let store = MemoryStore::new();
        assert!(store.latest_transition("nope").unwrap().is_none());
        assert!(store.all_transitions("nope").unwrap().is_empty());
        assert!(store.events("nope").unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let store = MemoryStore::new();
        store.append_event(&event("web", "issue", 1)).unwrap();
        store.append_event(&event("web", "issue", 2)).unwrap();
        store.append_event(&event("cache", "ok", 1)).unwrap();
        store
            .append_transition(&Transition::new("web", "issue", 1))
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.service_count, 2);
        assert_eq!(stats.event_count, 3);
        assert_eq!(stats.transition_count, 1);
    }
}

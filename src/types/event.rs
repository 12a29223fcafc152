//! Raw state-change events
//!
//! An event is a single report of a service's state as it was received.
//! Events are immutable and append-only: the raw log is the source of truth,
//! every derived view (transitions, intervals) can be rebuilt from it.

use serde::{Deserialize, Serialize};

/// A raw, timestamped report of a service's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Name of the reporting service
    pub service_name: String,

    /// Reported state label ("issue", "deploy", "ok", ...)
    pub state: String,

    /// Unix timestamp (seconds) claimed by the producer
    pub timestamp: i64,

    /// Unix timestamp (seconds) at which the event reached us
    #[serde(default)]
    pub received_at: i64,
}

impl Event {
    /// Create a new event stamped with the current arrival time
    pub fn new(service_name: impl Into<String>, state: impl Into<String>, timestamp: i64) -> Self {
        Self {
            service_name: service_name.into(),
            state: state.into(),
            timestamp,
            received_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Serialize event to JSON string (for JSONL)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize event from JSON string
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = Event {
            service_name: "web-server".to_string(),
            state: "issue".to_string(),
            timestamp: 1704067200,
            received_at: 1704067201,
        };

        let json = event.to_json_line().unwrap();
        assert!(json.contains("\"service_name\":\"web-server\""));
        assert!(json.contains("\"timestamp\":1704067200"));

        let parsed = Event::from_json_line(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_received_at_defaults_when_missing() {
        let parsed =
            Event::from_json_line(r#"{"service_name":"cache","state":"ok","timestamp":5}"#)
                .unwrap();
        assert_eq!(parsed.received_at, 0);
        assert_eq!(parsed.timestamp, 5);
    }

    #[test]
    fn test_new_stamps_arrival_time() {
        let before = chrono::Utc::now().timestamp();
        let event = Event::new("database", "deploy", 100);
        assert!(event.received_at >= before);
        assert_eq!(event.timestamp, 100);
    }
}

//! Transition records and tracker outcomes

use serde::{Deserialize, Serialize};

use super::Event;

/// A recorded state change of a service
///
/// For one service, transitions ordered by timestamp are the points at which
/// the reported state differed from the previously recorded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub service_name: String,
    pub state: String,
    pub timestamp: i64,
}

impl Transition {
    pub fn new(service_name: impl Into<String>, state: impl Into<String>, timestamp: i64) -> Self {
        Self {
            service_name: service_name.into(),
            state: state.into(),
            timestamp,
        }
    }

    /// Serialize transition to JSON string (for JSONL)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize transition from JSON string
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

impl From<&Event> for Transition {
    fn from(event: &Event) -> Self {
        Self {
            service_name: event.service_name.clone(),
            state: event.state.clone(),
            timestamp: event.timestamp,
        }
    }
}

/// Result of recording one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The state differed from the reference transition; a new one was stored
    NewTransition(Transition),
    /// The state matched the reference transition; only the raw event was stored
    DuplicateSuppressed,
}

impl TransitionOutcome {
    /// Wire label of the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionOutcome::NewTransition(_) => "new_transition",
            TransitionOutcome::DuplicateSuppressed => "duplicate_suppressed",
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, TransitionOutcome::NewTransition(_))
    }
}

impl std::fmt::Display for TransitionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of one service, as answered by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSeen {
    pub state: String,
    /// Timestamp of the transition into `state`
    pub since: i64,
}

impl From<Transition> for ServiceSeen {
    fn from(transition: Transition) -> Self {
        Self {
            state: transition.state,
            since: transition.timestamp,
        }
    }
}

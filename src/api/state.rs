//! Shared application state for HTTP handlers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;

use crate::monitor::ServiceMonitor;
use crate::types::Transition;

/// A newly recorded transition, as pushed to stream subscribers
///
/// Published while the service's lock is held, so for one service
/// `sequence_id` order is the order transitions were appended.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionNotice {
    #[serde(flatten)]
    pub transition: Transition,
    /// Monotonically increasing per process
    pub sequence_id: u64,
}

/// State shared by every request handler
pub struct AppState {
    /// The monitor core
    pub monitor: Arc<ServiceMonitor>,

    /// Broadcast channel for newly recorded transitions
    pub transition_tx: broadcast::Sender<TransitionNotice>,

    sequence_counter: AtomicU64,
}

impl AppState {
    /// Create state around a monitor
    pub fn new(monitor: Arc<ServiceMonitor>) -> Self {
        // Buffer 1024 notices - slower subscribers get a lagged marker
        let (transition_tx, _) = broadcast::channel(1024);

        Self {
            monitor,
            transition_tx,
            sequence_counter: AtomicU64::new(0),
        }
    }

    /// Push a new transition to all stream subscribers
    pub fn publish(&self, transition: Transition) {
        let sequence_id = self.sequence_counter.fetch_add(1, Ordering::SeqCst);
        // No receivers is not an error
        let _ = self.transition_tx.send(TransitionNotice {
            transition,
            sequence_id,
        });
    }

    /// Number of transitions published so far
    pub fn current_sequence_id(&self) -> u64 {
        self.sequence_counter.load(Ordering::SeqCst)
    }

    /// Subscribe to new transitions
    pub fn subscribe(&self) -> broadcast::Receiver<TransitionNotice> {
        self.transition_tx.subscribe()
    }
}

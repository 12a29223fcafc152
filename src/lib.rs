//! Minikom - Service State Tracker
//!
//! Tracks the operational state ("issue", "deploy", "ok", ...) of a fleet of
//! named services from a stream of timestamped state events, and serves two
//! derived views: the current state of every service, and the history of a
//! service as contiguous time intervals.
//!
//! # Features
//!
//! - **Duplicate suppression**: only state changes become transitions
//! - **Out-of-order tolerant**: ordering always comes from event timestamps
//! - **Per-service serialization**: concurrent producers never race on one service
//! - **Pluggable storage**: in-memory or durable JSON-lines logs
//! - **HTTP API**: ingestion, queries and a live transition stream
//!
//! # Modules
//!
//! - `types`: Core records (Event, Transition, Interval)
//! - `event_store`: Storage capability and its implementations
//! - `monitor`: Transition tracking, current-state and interval queries
//! - `validation`: Field checks on incoming events
//! - `api`: HTTP ingestion gateway and query endpoints
//! - `config`: Environment configuration
//! - `observability`: Logging setup
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use minikom::event_store::MemoryStore;
//! use minikom::ServiceMonitor;
//!
//! let monitor = ServiceMonitor::new(Arc::new(MemoryStore::new()));
//! monitor.record_event("web", "issue", 100).unwrap();
//! monitor.record_event("web", "deploy", 200).unwrap();
//!
//! let intervals = monitor.intervals("web").unwrap();
//! assert_eq!(intervals[0].end_time, Some(200));
//! assert_eq!(monitor.latest_states().unwrap()["web"].state, "deploy");
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod event_store;
pub mod monitor;
pub mod observability;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use config::Config;
pub use error::{MonitorError, MonitorResult, StoreError, StoreResult, ValidationError};
pub use event_store::{JsonlStore, JsonlStoreConfig, MemoryStore, StateStore};
pub use monitor::{derive_intervals, OrderingPolicy, ServiceMonitor};
pub use types::{Event, Interval, ServiceSeen, Transition, TransitionOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Event Store Module
//!
//! Append-only persistence for raw events and transition records:
//! - `StateStore`: the storage capability the monitor core is built against
//! - `MemoryStore`: volatile store, also the test substitute
//! - `JsonlStore`: durable JSON-lines logs replayed on startup
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌──────────┐    ┌──────────────┐    ┌────────────────────┐
//! │ /event   │───►│ events.jsonl │───►│ transitions.jsonl  │
//! │ request  │    │ (always)     │    │ (on state change)  │
//! └──────────┘    └──────────────┘    └────────────────────┘
//!
//! Read Path:
//! ┌────────────────────┐    ┌──────────────────────────────┐
//! │ Replay on open     │───►│ Per-service transition index │───► queries
//! │ (transitions.jsonl)│    │ sorted by timestamp          │
//! └────────────────────┘    └──────────────────────────────┘
//!   events.jsonl is only counted on open and scanned for diagnostics
//! ```

mod jsonl;
mod memory;
mod stats;
mod store;

pub use jsonl::{JsonlStore, JsonlStoreConfig};
pub use memory::MemoryStore;
pub use stats::StoreStats;
pub use store::StateStore;

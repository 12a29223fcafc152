//! API module for HTTP endpoints
//!
//! The ingestion gateway (`POST /event`), the query endpoints, and a
//! Server-Sent Events feed of new transitions.

pub mod http;
pub mod rest;
pub mod state;
pub mod stream;

pub use http::create_router;
pub use state::{AppState, TransitionNotice};

//! Input validation for events
//!
//! Runs before any storage access so rejected requests leave no trace.

mod fields;

pub use fields::{validate_event_fields, validate_service_name, validate_state};

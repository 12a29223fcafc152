//! Field checks for incoming events
//!
//! State labels are an open set; the only rule enforced here is that names
//! and labels carry at least one non-whitespace character.

use crate::error::ValidationError;

/// Check that a service name is usable as a key
pub fn validate_service_name(service_name: &str) -> Result<(), ValidationError> {
    if service_name.trim().is_empty() {
        Err(ValidationError::EmptyServiceName)
    } else {
        Ok(())
    }
}

/// Check that a state label is present
pub fn validate_state(state: &str) -> Result<(), ValidationError> {
    if state.trim().is_empty() {
        Err(ValidationError::EmptyState)
    } else {
        Ok(())
    }
}

/// Validate both fields of an event, service name first
pub fn validate_event_fields(service_name: &str, state: &str) -> Result<(), ValidationError> {
    validate_service_name(service_name)?;
    validate_state(state)
}

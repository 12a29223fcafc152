//! Error types and result aliases
//!
//! Storage collaborators report [`StoreError`]; the monitor core wraps it as
//! [`MonitorError::StorageUnavailable`] next to request validation failures.
//! None of these are fatal to the process.

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Errors raised by a [`StateStore`](crate::event_store::StateStore) implementation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("log corrupted at {path}:{line}: {message}")]
    Corrupted {
        path: String,
        line: usize,
        message: String,
    },
}

/// Rejected request fields, detected before storage is touched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("service_name must not be empty")]
    EmptyServiceName,

    #[error("state must not be empty")]
    EmptyState,
}

/// Errors surfaced by the monitor core to its callers
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store failed; retry policy belongs to the caller
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

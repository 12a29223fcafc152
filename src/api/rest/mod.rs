//! REST API module for HTTP endpoints
//!
//! - `POST /event` - Ingest one state event
//! - `GET /services` - Latest state of every service
//! - `GET /services/:name/latest-states` - State history as intervals
//! - `GET /services/:name/intervals` - Same as above
//! - `GET /services/:name/events` - Raw events, for diagnostics
//! - `GET /stats` - Store counters

pub mod events;
pub mod services;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::MonitorError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "VALIDATION_ERROR".to_string(),
        }
    }

    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "UNSUPPORTED_MEDIA_TYPE".to_string(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "PAYLOAD_TOO_LARGE".to_string(),
        }
    }

    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "STORAGE_UNAVAILABLE".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
        }
    }
}

/// Map a monitor failure to a status code and error body
pub fn monitor_error_response(err: MonitorError) -> Response {
    match &err {
        MonitorError::Validation(e) => {
            tracing::warn!(error = %e, "rejected event");
            (StatusCode::BAD_REQUEST, Json(ApiError::validation(e.to_string()))).into_response()
        }
        MonitorError::StorageUnavailable(e) => {
            tracing::error!(error = %e, "storage failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiError::storage_unavailable(err.to_string())),
            )
                .into_response()
        }
    }
}

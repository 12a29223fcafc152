//! Event ingestion endpoint

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;

use super::{monitor_error_response, ApiError};
use crate::api::state::AppState;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Body of `POST /event`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventRequest {
    pub service_name: String,
    pub state: String,
    /// Seconds since epoch
    pub timestamp: i64,
}

/// Response for `POST /event`
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub outcome: &'static str,
}

/// A request body the gateway refuses before reaching the monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRequest {
    pub status: StatusCode,
    pub message: String,
}

impl MalformedRequest {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<BytesRejection> for MalformedRequest {
    fn from(rejection: BytesRejection) -> Self {
        let status = rejection.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            format!("Request body must not be larger than {} bytes", MAX_BODY_BYTES)
        } else {
            rejection.body_text()
        };
        Self { status, message }
    }
}

impl IntoResponse for MalformedRequest {
    fn into_response(self) -> Response {
        let error = match self.status {
            StatusCode::UNSUPPORTED_MEDIA_TYPE => ApiError::unsupported_media_type(self.message),
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large(self.message),
            _ => ApiError::bad_request(self.message),
        };
        (self.status, Json(error)).into_response()
    }
}

/// Check the content type and decode a single JSON event object
///
/// A missing `Content-Type` header is accepted; a present one must name
/// `application/json` (parameters such as `charset` are ignored).
pub fn decode_event_body(headers: &HeaderMap, body: &[u8]) -> Result<EventRequest, MalformedRequest> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        let media_type = content_type
            .to_str()
            .unwrap_or_default()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        if !media_type.eq_ignore_ascii_case("application/json") {
            return Err(MalformedRequest {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                message: "Content-Type header is not application/json".to_string(),
            });
        }
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(MalformedRequest::bad_request("Request body must not be empty"));
    }

    serde_json::from_slice(body).map_err(|e| {
        let message = match e.classify() {
            Category::Syntax if e.to_string().starts_with("trailing characters") => {
                "Request body must only contain a single JSON object".to_string()
            }
            Category::Syntax => format!(
                "Request body contains badly-formed JSON (at line {}, column {})",
                e.line(),
                e.column()
            ),
            Category::Eof => "Request body contains badly-formed JSON".to_string(),
            Category::Data => format!("Request body contains an invalid value: {}", e),
            Category::Io => format!("Request body could not be read: {}", e),
        };
        MalformedRequest::bad_request(message)
    })
}

/// POST /event - Record a state event for a service
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let decoded = body
        .map_err(MalformedRequest::from)
        .and_then(|body| decode_event_body(&headers, &body));
    let request = match decoded {
        Ok(request) => request,
        Err(malformed) => {
            tracing::warn!(status = %malformed.status, message = %malformed.message, "malformed event request");
            return malformed.into_response();
        }
    };

    // Stores may fsync; keep that off the async workers
    let app = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        app.monitor.record_event_with(
            &request.service_name,
            &request.state,
            request.timestamp,
            |transition| app.publish(transition.clone()),
        )
    })
    .await;

    match result {
        Ok(Ok(outcome)) => {
            (StatusCode::OK, Json(EventResponse { outcome: outcome.as_str() })).into_response()
        }
        Ok(Err(err)) => monitor_error_response(err),
        Err(join_err) => {
            tracing::error!(error = %join_err, "event recording task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::internal("event recording task failed")),
            )
                .into_response()
        }
    }
}

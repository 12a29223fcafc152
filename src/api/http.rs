//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::events::{post_event, MAX_BODY_BYTES};
use super::rest::services::{get_stats, list_services, service_events, service_intervals};
use super::state::AppState;
use super::stream::transition_stream;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Ingestion
        .route("/event", post(post_event))
        // Queries
        .route("/services", get(list_services))
        .route("/services/:service_name/latest-states", get(service_intervals))
        .route("/services/:service_name/intervals", get(service_intervals))
        .route("/services/:service_name/events", get(service_events))
        .route("/stats", get(get_stats))
        .route("/transitions/stream", get(transition_stream))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_store::MemoryStore;
    use crate::monitor::ServiceMonitor;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let monitor = Arc::new(ServiceMonitor::new(Arc::new(MemoryStore::new())));
        let app = create_router(Arc::new(AppState::new(monitor)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }
}

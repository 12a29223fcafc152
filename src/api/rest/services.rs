//! Service query endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::monitor_error_response;
use crate::api::state::AppState;
use crate::event_store::StoreStats;

/// GET /services - Latest state of every service
pub async fn list_services(State(state): State<Arc<AppState>>) -> Response {
    match state.monitor.latest_states() {
        Ok(states) => Json(states).into_response(),
        Err(err) => monitor_error_response(err),
    }
}

/// GET /services/:service_name/latest-states - State history as intervals
///
/// An unknown service yields an empty list.
pub async fn service_intervals(
    State(state): State<Arc<AppState>>,
    Path(service_name): Path<String>,
) -> Response {
    match state.monitor.intervals(&service_name) {
        Ok(intervals) => Json(intervals).into_response(),
        Err(err) => monitor_error_response(err),
    }
}

/// GET /services/:service_name/events - Raw events ordered by timestamp
pub async fn service_events(
    State(state): State<Arc<AppState>>,
    Path(service_name): Path<String>,
) -> Response {
    match state.monitor.events(&service_name) {
        Ok(events) => Json(events).into_response(),
        Err(err) => monitor_error_response(err),
    }
}

/// Response for GET /stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub store: StoreStats,
    pub suppression_ratio: f64,
    pub ordering: &'static str,
    pub published_transitions: u64,
    pub version: &'static str,
}

/// GET /stats - Store counters
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Response {
    match state.monitor.stats() {
        Ok(store) => Json(StatsResponse {
            suppression_ratio: store.suppression_ratio(),
            store,
            ordering: state.monitor.policy().as_str(),
            published_transitions: state.current_sequence_id(),
            version: crate::VERSION,
        })
        .into_response(),
        Err(err) => monitor_error_response(err),
    }
}

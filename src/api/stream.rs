//! Server-Sent Events stream of new transitions

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use serde::Serialize;
use tokio::sync::broadcast;

use super::state::AppState;

#[derive(Debug, Serialize)]
struct LaggedNotice {
    missed: u64,
    message: String,
}

/// GET /transitions/stream - Push every transition recorded after connect
pub async fn transition_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.subscribe();
    tracing::debug!(subscribers = state.transition_tx.receiver_count(), "stream subscriber connected");

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(notice) => {
                    yield Ok::<_, Infallible>(Event::default()
                        .event("transition")
                        .id(notice.sequence_id.to_string())
                        .data(serde_json::to_string(&notice).unwrap_or_default()));
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    let lagged = LaggedNotice {
                        missed,
                        message: format!("Missed {} transitions, re-read /services", missed),
                    };
                    yield Ok::<_, Infallible>(Event::default()
                        .event("lagged")
                        .data(serde_json::to_string(&lagged).unwrap_or_default()));
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default().interval(Duration::from_secs(30)))
}

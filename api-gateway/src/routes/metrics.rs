use axum::extract::State;
use axum::http::header;

use crate::state::SharedState;

/// `GET /metrics`
///
/// Serves the Prometheus text exposition format.
pub async fn metrics(State(state): State<SharedState>) -> ([(header::HeaderName, &'static str); 1], String) {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.gather_text(),
    )
}

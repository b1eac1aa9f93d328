//! Shared application state.

use std::sync::Arc;

use pipeline::{DefaultPipelineEngine, MetricsRegistry};

/// Shared state held by the request handlers.
///
/// This is wrapped in an [`Arc`] and passed to handlers via Axum's `State`
/// extractor. The engine is stateless between runs (every request re-runs
/// the pipeline), so no locking is needed.
pub struct AppState {
    /// Default HTTP pipeline engine (registry source + explorer client).
    pub engine: DefaultPipelineEngine,
    /// Metrics registry shared between the pipeline and the `/metrics` route.
    pub metrics: Arc<MetricsRegistry>,
}

/// Thread-safe alias for `AppState`.
pub type SharedState = Arc<AppState>;

// api-gateway/src/main.rs

//! API gateway binary.
//!
//! This binary exposes the `pipeline` crate over a small HTTP API:
//!
//! - `GET /health`
//! - `GET /chains`
//! - `GET /aggregates/{category}`
//! - `GET /crosstab`
//! - `GET /transactions/weekly`
//! - `GET /summary`
//! - `GET /metrics`
//!
//! Each data route re-runs the full pipeline (registry fetch + enrichment
//! fan-out); there is no cross-request cache.

mod config;
mod routes;
mod state;

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::signal;

use pipeline::{
    HttpExplorerClient, HttpRegistrySource, MetricsRegistry, PipelineConfig, PipelineEngine,
};

use config::ApiConfig;
use routes::{aggregates, chains, health, metrics};
use state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    // Basic tracing setup.
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api_gateway=info,pipeline=info".to_string()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let api_cfg = ApiConfig::from_env();
    let mut pipeline_cfg = PipelineConfig::default();
    if let Ok(url) = std::env::var("REGISTRY_URL") {
        pipeline_cfg.registry.url = url;
    }

    // ---------------------------
    // Metrics
    // ---------------------------

    let metrics_registry = Arc::new(
        MetricsRegistry::new().map_err(|e| format!("failed to initialise metrics registry: {e}"))?,
    );

    // ---------------------------
    // Pipeline engine
    // ---------------------------

    let source = HttpRegistrySource::new(pipeline_cfg.registry.clone())
        .map_err(|e| format!("failed to create registry source: {e}"))?;
    let explorer = HttpExplorerClient::new(pipeline_cfg.explorer.clone())
        .map_err(|e| format!("failed to create explorer client: {e}"))?;

    let engine = PipelineEngine::new(
        source,
        explorer,
        pipeline_cfg.history_days,
        metrics_registry.clone(),
    );

    // ---------------------------
    // Shared state
    // ---------------------------

    let app_state: SharedState = Arc::new(AppState {
        engine,
        metrics: metrics_registry,
    });

    // ---------------------------
    // HTTP router
    // ---------------------------

    let app = Router::new()
        .route("/health", get(health::health))
        .route("/chains", get(chains::list_chains))
        .route("/aggregates/{category}", get(aggregates::aggregate_by_category))
        .route("/crosstab", get(aggregates::crosstab))
        .route("/transactions/weekly", get(aggregates::weekly_transactions))
        .route("/summary", get(aggregates::summary))
        .route("/metrics", get(metrics::metrics))
        .with_state(app_state);

    // ---------------------------
    // axum 0.8 server (hyper 1 / tokio 1.48 style)
    // ---------------------------

    tracing::info!("API gateway listening on http://{}", api_cfg.listen_addr);

    let listener = tokio::net::TcpListener::bind(api_cfg.listen_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", api_cfg.listen_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("API server error: {e}"))?;

    Ok(())
}

/// Waits for Ctrl-C and returns, used for graceful shutdown.
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

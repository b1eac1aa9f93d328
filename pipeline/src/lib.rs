//! Pipeline library crate.
//!
//! This crate provides the core building blocks of the rollup dashboard
//! backend:
//!
//! - strongly-typed domain records and filters (`types`),
//! - the registry loader (`registry`),
//! - block-explorer clients (`explorer`),
//! - the concurrent enrichment fan-out (`enrich`),
//! - the parametrized aggregation engine (`aggregate`),
//! - the category color palette (`palette`),
//! - Prometheus-based metrics (`metrics`),
//! - and the top-level orchestration (`engine`, `config`).
//!
//! Higher-level binaries compose these pieces; the API gateway wires the
//! default HTTP stack and exposes records and aggregates to tables and
//! charts.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod enrich;
pub mod explorer;
pub mod metrics;
pub mod palette;
pub mod registry;
pub mod types;

// Re-export top-level configuration types.
pub use config::{ExplorerConfig, HistoryWindow, PipelineConfig, RegistryConfig};

// Re-export the pipeline seams and their HTTP implementations.
pub use explorer::{ExplorerClient, ExplorerError, ExplorerStats, HttpExplorerClient};
pub use registry::{HttpRegistrySource, RegistryError, RegistrySource};

// Re-export the enrichment and orchestration surface.
pub use engine::{PipelineEngine, PipelineRun};
pub use enrich::{EnrichmentOutcome, EnrichmentReport, RecordOutcome};

// Re-export the aggregate shapes consumed by rendering collaborators.
pub use aggregate::{
    CrossTab, DashboardSummary, GroupSummary, WeeklyBucket, apply_filters, cross_tab,
    group_by_category, summarize, weekly_series,
};

// Re-export metrics and the palette helper.
pub use metrics::{MetricsRegistry, PipelineMetrics};
pub use palette::color_for_index;

// Re-export domain types at the crate root for convenience.
pub use types::*;

/// Type alias for the default engine stack used by a "typical" deployment.
///
/// This composes:
///
/// - [`HttpRegistrySource`] for the spreadsheet-backed registry, and
/// - [`HttpExplorerClient`] for the Blockscout explorer APIs.
pub type DefaultPipelineEngine = PipelineEngine<HttpRegistrySource, HttpExplorerClient>;

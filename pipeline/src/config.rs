//! Top-level configuration for the pipeline.
//!
//! This module aggregates configuration for:
//!
//! - the registry source (spreadsheet endpoint URL + timeout),
//! - the block-explorer client (per-request timeout),
//! - the enrichment history window (how far back to request daily counts).
//!
//! The goal is to have a single `PipelineConfig` struct that higher-level
//! binaries (e.g. the API gateway) can construct from defaults, config
//! files, or environment variables as needed.

use std::time::Duration;

/// Configuration for the registry source.
///
/// The default URL points at the public Google Sheets "values" endpoint for
/// the chain registry; deployments append their own `key=` query parameter
/// via the `REGISTRY_URL` environment variable or an explicit config.
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Full URL of the tabular registry endpoint.
    pub url: String,
    /// Request timeout for the registry fetch.
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: "https://sheets.googleapis.com/v4/spreadsheets/\
                  1IuSBmbdAu_fdQ4X3VCgAEz1wSxdYiJe8Kn5lUtnr2tg/values/Sheet1!A2:Z1000"
                .to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Configuration for the block-explorer HTTP client.
#[derive(Clone, Debug)]
pub struct ExplorerConfig {
    /// Timeout applied independently to every explorer request.
    pub timeout: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Top-level configuration for one pipeline instance.
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    pub registry: RegistryConfig,
    pub explorer: ExplorerConfig,
    /// How many trailing days of per-chain daily counts to request.
    pub history_days: HistoryWindow,
}

/// Trailing length of the transaction-history request, in days.
#[derive(Clone, Copy, Debug)]
pub struct HistoryWindow(pub i64);

impl Default for HistoryWindow {
    fn default() -> Self {
        // One year, enough to serve every selectable time range.
        HistoryWindow(365)
    }
}

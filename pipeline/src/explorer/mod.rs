//! Clients for per-chain block-explorer APIs.
//!
//! This module defines the generic [`ExplorerClient`] seam used by the
//! enrichment fan-out and a concrete HTTP implementation
//! ([`http::HttpExplorerClient`]) that speaks the Blockscout v2 API.
//!
//! Explorer failures are always per-record: a timeout or malformed payload
//! downgrades that one chain to sentinel values and must never abort the
//! enrichment of sibling records.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::DailyTxPoint;

pub mod http;

pub use http::HttpExplorerClient;

/// Aggregate statistics reported by an explorer's summary endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExplorerStats {
    pub total_addresses: u64,
    pub total_transactions: u64,
    pub transactions_today: u64,
}

/// Errors that can occur while contacting a block explorer.
#[derive(Debug)]
pub enum ExplorerError {
    /// Transport-level error (e.g. connection failure, timeout).
    Transport(String),
    /// The explorer returned a non-success HTTP status.
    Service(String),
    /// The explorer returned a malformed or unexpected response.
    Protocol(String),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerError::Transport(msg) => write!(f, "explorer transport error: {msg}"),
            ExplorerError::Service(msg) => write!(f, "explorer service error: {msg}"),
            ExplorerError::Protocol(msg) => write!(f, "explorer protocol error: {msg}"),
        }
    }
}

impl std::error::Error for ExplorerError {}

/// Abstract block-explorer client used by the enrichment fan-out.
///
/// `base_url` is the per-chain explorer root from the registry; both calls
/// are independent and each carries its own timeout.
#[async_trait]
pub trait ExplorerClient: Send + Sync {
    /// Fetches the summary statistics for a chain.
    async fn stats(&self, base_url: &str) -> Result<ExplorerStats, ExplorerError>;

    /// Fetches the per-day transaction counts for `from..=to`, in the
    /// order returned by the explorer.
    async fn tx_history(
        &self,
        base_url: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyTxPoint>, ExplorerError>;
}

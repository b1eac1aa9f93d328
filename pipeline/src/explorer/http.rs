//! HTTP explorer client for the Blockscout v2 API.
//!
//! Two endpoints are consumed per chain:
//!
//! ```text
//! GET {base}/api/v2/stats
//! {
//!   "total_addresses": "1523412",
//!   "total_transactions": "98231544",
//!   "transactions_today": "120334"
//! }
//!
//! GET {base}/api/v2/stats/charts/transactions?from=2024-08-23&to=2025-08-23
//! {
//!   "chart_data": [
//!     { "date": "2025-08-22", "tx_count": 118220 },
//!     { "date": "2025-08-23", "tx_count": 120334 }
//!   ]
//! }
//! ```
//!
//! Blockscout deployments disagree on whether counters are JSON numbers or
//! decimal strings, so the response types accept both.

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use async_trait::async_trait;

use crate::config::ExplorerConfig;
use crate::explorer::{ExplorerClient, ExplorerError, ExplorerStats};
use crate::types::DailyTxPoint;

/// Block-explorer client using one shared connection pool.
///
/// The client is `Send + Sync` and is shared across the whole enrichment
/// fan-out; the configured timeout applies to every request independently.
pub struct HttpExplorerClient {
    client: Client,
}

impl HttpExplorerClient {
    /// Constructs a new client with the configured per-request timeout.
    pub fn new(cfg: ExplorerConfig) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| ExplorerError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn endpoint(base_url: &str, path: &str) -> String {
        // Avoid accidental double slashes.
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ExplorerError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExplorerError::Transport(format!("GET {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExplorerError::Service(format!(
                "explorer returned HTTP status {status} for {url}"
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ExplorerError::Protocol(format!("failed to parse JSON response: {e}")))
    }
}

/// Accepts a counter encoded as a JSON number or a decimal string.
fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("not an integer counter: {s:?}"))),
    }
}

/// Payload of `GET /api/v2/stats`.
#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(deserialize_with = "number_or_string")]
    total_addresses: u64,
    #[serde(deserialize_with = "number_or_string")]
    total_transactions: u64,
    #[serde(deserialize_with = "number_or_string")]
    transactions_today: u64,
}

/// Payload of `GET /api/v2/stats/charts/transactions`.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart_data: Vec<ChartPoint>,
}

#[derive(Debug, Deserialize)]
struct ChartPoint {
    date: NaiveDate,
    #[serde(deserialize_with = "number_or_string")]
    tx_count: u64,
}

#[async_trait]
impl ExplorerClient for HttpExplorerClient {
    async fn stats(&self, base_url: &str) -> Result<ExplorerStats, ExplorerError> {
        let url = Self::endpoint(base_url, "/api/v2/stats");
        let body: StatsResponse = self.get_json(&url).await?;

        Ok(ExplorerStats {
            total_addresses: body.total_addresses,
            total_transactions: body.total_transactions,
            transactions_today: body.transactions_today,
        })
    }

    async fn tx_history(
        &self,
        base_url: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyTxPoint>, ExplorerError> {
        let url = format!(
            "{}?from={from}&to={to}",
            Self::endpoint(base_url, "/api/v2/stats/charts/transactions")
        );
        let body: ChartResponse = self.get_json(&url).await?;

        Ok(body
            .chart_data
            .into_iter()
            .map(|p| DailyTxPoint {
                date: p.date,
                tx_count: p.tx_count,
            })
            .collect())
    }
}

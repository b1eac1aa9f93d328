//! HTTP registry source backed by a Google-Sheets-style values endpoint.
//!
//! The endpoint returns a JSON document of the form:
//!
//! ```json
//! {
//!   "values": [
//!     ["Zora", "https://explorer.zora.energy", "", "Conduit", "...", "..."],
//!     ["Redstone", "", "", "Lattice", "...", "..."]
//!   ]
//! }
//! ```
//!
//! Each row is an array of string cells addressed by fixed position. The
//! column layout is an external contract this loader must match exactly:
//!
//! | index | field              |
//! |-------|--------------------|
//! | 0     | name               |
//! | 1     | block explorer URL |
//! | 3     | RaaS provider      |
//! | 7     | launch date        |
//! | 8     | vertical           |
//! | 9     | framework          |
//! | 10    | data availability  |
//! | 11    | L2/L3 tier         |
//! | 12    | settlement layer   |
//!
//! Absent, empty, or whitespace-only cells become the sentinel, so every
//! field of the emitted record is always populated. Rows are never dropped:
//! an entirely blank row still yields an all-sentinel record.

use reqwest::Client;
use serde::Deserialize;

use async_trait::async_trait;

use crate::config::RegistryConfig;
use crate::registry::{RegistryError, RegistrySource};
use crate::types::{ChainRecord, SENTINEL};

// Fixed column positions in the source sheet.
const COL_NAME: usize = 0;
const COL_EXPLORER_URL: usize = 1;
const COL_RAAS: usize = 3;
const COL_LAUNCH_DATE: usize = 7;
const COL_VERTICAL: usize = 8;
const COL_FRAMEWORK: usize = 9;
const COL_DA: usize = 10;
const COL_L2_OR_L3: usize = 11;
const COL_SETTLEMENT: usize = 12;

/// Registry source that fetches the sheet over HTTP.
pub struct HttpRegistrySource {
    cfg: RegistryConfig,
    client: Client,
}

impl HttpRegistrySource {
    /// Constructs a new source from the given configuration.
    pub fn new(cfg: RegistryConfig) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| RegistryError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { cfg, client })
    }
}

/// Raw payload shape of the values endpoint.
#[derive(Debug, Deserialize)]
struct SheetValuesResponse {
    values: Option<Vec<Vec<String>>>,
}

/// Returns the cell at `idx`, normalised to the sentinel when the column is
/// absent, empty, or whitespace-only.
fn cell(row: &[String], idx: usize) -> String {
    match row.get(idx) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => SENTINEL.to_string(),
    }
}

/// Maps one raw row to a [`ChainRecord`] by fixed column position.
fn parse_row(row: &[String]) -> ChainRecord {
    let mut record = ChainRecord::new(cell(row, COL_NAME));

    // The explorer URL is the one field modelled as an Option: a record
    // without one never enters the enrichment fan-out.
    let url = cell(row, COL_EXPLORER_URL);
    record.block_explorer_url = if url == SENTINEL { None } else { Some(url) };

    record.raas_provider = cell(row, COL_RAAS);
    record.launch_date = cell(row, COL_LAUNCH_DATE);
    record.vertical = cell(row, COL_VERTICAL);
    record.framework = cell(row, COL_FRAMEWORK);
    record.data_availability = cell(row, COL_DA);
    record.l2_or_l3 = cell(row, COL_L2_OR_L3);
    record.settlement = cell(row, COL_SETTLEMENT);

    record
}

/// Normalises a decoded payload into records, one per row, in source order.
///
/// A payload without the `values` table is missing the expected tabular
/// shape and is a protocol error; rows themselves are never dropped.
fn parse_payload(body: SheetValuesResponse) -> Result<Vec<ChainRecord>, RegistryError> {
    let rows = body
        .values
        .ok_or_else(|| RegistryError::Protocol("payload has no `values` table".to_string()))?;

    Ok(rows.iter().map(|row| parse_row(row)).collect())
}

#[async_trait]
impl RegistrySource for HttpRegistrySource {
    async fn fetch(&self) -> Result<Vec<ChainRecord>, RegistryError> {
        let resp = self
            .client
            .get(&self.cfg.url)
            .send()
            .await
            .map_err(|e| RegistryError::Transport(format!("GET {} failed: {e}", self.cfg.url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RegistryError::Service(format!(
                "registry endpoint returned HTTP status {status}"
            )));
        }

        let body = resp
            .json::<SheetValuesResponse>()
            .await
            .map_err(|e| RegistryError::Protocol(format!("failed to parse JSON payload: {e}")))?;

        parse_payload(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn parse_row_maps_fixed_columns() {
        let raw = row(&[
            "Zora",
            " https://explorer.zora.energy ",
            "ignored",
            "Conduit",
            "ignored",
            "ignored",
            "ignored",
            "2023-06-21",
            "NFT,Creator",
            "OP Stack",
            "Ethereum",
            "L2",
            "Ethereum",
        ]);

        let rec = parse_row(&raw);
        assert_eq!(rec.name, "Zora");
        assert_eq!(
            rec.block_explorer_url.as_deref(),
            Some("https://explorer.zora.energy")
        );
        assert_eq!(rec.raas_provider, "Conduit");
        assert_eq!(rec.launch_date, "2023-06-21");
        assert_eq!(rec.vertical, "NFT,Creator");
        assert_eq!(rec.framework, "OP Stack");
        assert_eq!(rec.data_availability, "Ethereum");
        assert_eq!(rec.l2_or_l3, "L2");
        assert_eq!(rec.settlement, "Ethereum");
        assert!(rec.total_transactions.is_none());
    }

    #[test]
    fn short_row_is_padded_with_sentinels() {
        let rec = parse_row(&row(&["Ancient8", ""]));
        assert_eq!(rec.name, "Ancient8");
        assert!(rec.block_explorer_url.is_none());
        assert_eq!(rec.raas_provider, SENTINEL);
        assert_eq!(rec.framework, SENTINEL);
        assert_eq!(rec.settlement, SENTINEL);
    }

    #[test]
    fn blank_row_is_still_emitted_as_all_sentinel() {
        let rec = parse_row(&row(&["", "   ", ""]));
        assert_eq!(rec.name, SENTINEL);
        assert!(rec.block_explorer_url.is_none());
        assert_eq!(rec.vertical, SENTINEL);
    }

    #[test]
    fn whitespace_explorer_url_is_treated_as_absent() {
        let rec = parse_row(&row(&["Foo", "   "]));
        assert!(rec.block_explorer_url.is_none());
    }

    #[test]
    fn payload_yields_one_record_per_row_in_source_order() {
        let json = r#"
        {
          "values": [
            ["Zora", "https://explorer.zora.energy"],
            ["", ""],
            ["Ancient8"]
          ]
        }
        "#;

        let body: SheetValuesResponse =
            serde_json::from_str(json).expect("payload should parse");
        let records = parse_payload(body).expect("tabular payload should be accepted");

        assert_eq!(records.len(), 3);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Zora", SENTINEL, "Ancient8"]);
    }

    #[test]
    fn payload_without_values_table_is_a_protocol_error() {
        let body: SheetValuesResponse =
            serde_json::from_str(r#"{ "range": "Sheet1!A2:Z1000" }"#).expect("should parse");

        let err = parse_payload(body).expect_err("missing table should be rejected");
        assert!(matches!(err, RegistryError::Protocol(_)));
    }
}

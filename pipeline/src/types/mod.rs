//! Core domain types used by the dashboard pipeline
//!
//! This module defines the per-chain registry record, the sentinel value used
//! for "no data", categorical field selection, and the token parsing rules
//! shared by every grouping and filtering operation. The goal is to avoid
//! "naked" string juggling in public APIs and keep the sentinel handling in
//! one place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filter criteria forwarded by UI collaborators.
pub mod filter;

pub use filter::{FilterCriteria, TimeRange};

/// Explicit "no data" marker used throughout the pipeline.
///
/// Registry cells that are absent, empty, or whitespace-only are stored as
/// this value rather than being left unset, so a field is always either real
/// data or the sentinel. The same token also appears inside comma-separated
/// category lists, where it means "not applicable" and is dropped during
/// token parsing.
pub const SENTINEL: &str = "--";

/// One day of transaction activity reported by a block explorer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DailyTxPoint {
    /// Calendar day the count applies to.
    pub date: NaiveDate,
    /// Number of transactions on that day.
    pub tx_count: u64,
}

/// One registry row: a chain's static metadata plus its enrichment slots.
///
/// Categorical fields are free text and may hold a comma-separated list of
/// values (a chain spanning two verticals, for example). They are never
/// empty: a missing cell is stored as [`SENTINEL`]. Enrichment fields start
/// as `None` and are overwritten only by a fully successful enrichment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainRecord {
    /// Chain name, the stable identifier within one registry load.
    pub name: String,
    /// Base URL of the chain's block explorer, if it has a queryable one.
    pub block_explorer_url: Option<String>,
    /// Rollup-as-a-Service provider.
    pub raas_provider: String,
    /// Launch date as reported in the registry (free text).
    pub launch_date: String,
    /// Vertical(s) the chain targets, e.g. `"DeFi,Gaming"`.
    pub vertical: String,
    /// Rollup framework, e.g. `"OP Stack"`.
    pub framework: String,
    /// Data-availability layer(s).
    pub data_availability: String,
    /// L2/L3 tier.
    pub l2_or_l3: String,
    /// Settlement layer.
    pub settlement: String,
    /// Total address count from the explorer, if enriched.
    pub total_addresses: Option<u64>,
    /// All-time transaction count from the explorer, if enriched.
    pub total_transactions: Option<u64>,
    /// Today's transaction count from the explorer, if enriched.
    pub transactions_today: Option<u64>,
    /// Per-day transaction counts from the explorer, empty until enriched.
    pub daily_tx_series: Vec<DailyTxPoint>,
}

impl ChainRecord {
    /// Creates a record with the given name and every other field at the
    /// sentinel / not-yet-fetched state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            block_explorer_url: None,
            raas_provider: SENTINEL.to_string(),
            launch_date: SENTINEL.to_string(),
            vertical: SENTINEL.to_string(),
            framework: SENTINEL.to_string(),
            data_availability: SENTINEL.to_string(),
            l2_or_l3: SENTINEL.to_string(),
            settlement: SENTINEL.to_string(),
            total_addresses: None,
            total_transactions: None,
            transactions_today: None,
            daily_tx_series: Vec::new(),
        }
    }

    /// Parsed token set of the chosen categorical field.
    pub fn tokens(&self, field: CategoryField) -> Vec<String> {
        split_tokens(field.value_of(self))
    }

    /// Whether this record carries any enrichment data.
    pub fn is_enriched(&self) -> bool {
        self.total_transactions.is_some()
    }
}

/// Splits a raw categorical cell into its token set.
///
/// Tokens are comma-separated, trimmed, and non-empty; the [`SENTINEL`]
/// token is dropped. An all-sentinel or empty cell yields no tokens.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != SENTINEL)
        .map(str::to_string)
        .collect()
}

/// Selector for the categorical fields a view can group or filter by.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CategoryField {
    Framework,
    Vertical,
    DataAvailability,
    L2OrL3,
    RaasProvider,
    Settlement,
}

impl CategoryField {
    /// Raw cell value of this field on a record.
    pub fn value_of<'a>(&self, record: &'a ChainRecord) -> &'a str {
        match self {
            CategoryField::Framework => &record.framework,
            CategoryField::Vertical => &record.vertical,
            CategoryField::DataAvailability => &record.data_availability,
            CategoryField::L2OrL3 => &record.l2_or_l3,
            CategoryField::RaasProvider => &record.raas_provider,
            CategoryField::Settlement => &record.settlement,
        }
    }

    /// Wire name used by the HTTP API.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryField::Framework => "framework",
            CategoryField::Vertical => "vertical",
            CategoryField::DataAvailability => "da",
            CategoryField::L2OrL3 => "l2_or_l3",
            CategoryField::RaasProvider => "raas",
            CategoryField::Settlement => "settlement",
        }
    }

    /// Parses a wire name back into a selector.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "framework" => Some(CategoryField::Framework),
            "vertical" => Some(CategoryField::Vertical),
            "da" => Some(CategoryField::DataAvailability),
            "l2_or_l3" => Some(CategoryField::L2OrL3),
            "raas" => Some(CategoryField::RaasProvider),
            "settlement" => Some(CategoryField::Settlement),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tokens_trims_and_drops_sentinel() {
        assert_eq!(split_tokens("DeFi, Gaming"), vec!["DeFi", "Gaming"]);
        assert_eq!(split_tokens(" DeFi ,, -- "), vec!["DeFi"]);
        assert!(split_tokens(SENTINEL).is_empty());
        assert!(split_tokens("").is_empty());
    }

    #[test]
    fn new_record_is_all_sentinel() {
        let rec = ChainRecord::new("Zora");
        assert_eq!(rec.name, "Zora");
        assert_eq!(rec.framework, SENTINEL);
        assert_eq!(rec.vertical, SENTINEL);
        assert!(rec.block_explorer_url.is_none());
        assert!(rec.total_transactions.is_none());
        assert!(rec.daily_tx_series.is_empty());
        assert!(!rec.is_enriched());
    }

    #[test]
    fn category_field_round_trips_wire_names() {
        let fields = [
            CategoryField::Framework,
            CategoryField::Vertical,
            CategoryField::DataAvailability,
            CategoryField::L2OrL3,
            CategoryField::RaasProvider,
            CategoryField::Settlement,
        ];
        for field in fields {
            assert_eq!(CategoryField::parse(field.as_str()), Some(field));
        }
        assert_eq!(CategoryField::parse("tvl"), None);
    }

    #[test]
    fn tokens_use_the_selected_field() {
        let mut rec = ChainRecord::new("Base");
        rec.vertical = "DeFi,Gaming".to_string();
        rec.framework = "OP Stack".to_string();

        assert_eq!(rec.tokens(CategoryField::Vertical), vec!["DeFi", "Gaming"]);
        assert_eq!(rec.tokens(CategoryField::Framework), vec!["OP Stack"]);
        assert!(rec.tokens(CategoryField::Settlement).is_empty());
    }
}

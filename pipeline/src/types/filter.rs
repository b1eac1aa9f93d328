//! Filter criteria forwarded by the UI filter bar.
//!
//! A [`FilterCriteria`] is an object of optional equality filters per
//! categorical field plus a trailing date-range selector. The pipeline
//! applies the equality filters before grouping; the date range is consumed
//! by the weekly transaction series.

use serde::{Deserialize, Serialize};

use super::{CategoryField, ChainRecord};

/// Trailing time window selectable in the filter bar.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    All,
    OneWeek,
    OneMonth,
    ThreeMonths,
    OneYear,
}

impl TimeRange {
    /// Number of trailing days the window covers, `None` for all time.
    pub fn trailing_days(&self) -> Option<i64> {
        match self {
            TimeRange::All => None,
            TimeRange::OneWeek => Some(7),
            TimeRange::OneMonth => Some(30),
            TimeRange::ThreeMonths => Some(90),
            TimeRange::OneYear => Some(365),
        }
    }

    /// Parses the wire form used by the HTTP API (`all`, `1w`, `1m`, `3m`, `1y`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(TimeRange::All),
            "1w" => Some(TimeRange::OneWeek),
            "1m" => Some(TimeRange::OneMonth),
            "3m" => Some(TimeRange::ThreeMonths),
            "1y" => Some(TimeRange::OneYear),
            _ => None,
        }
    }
}

/// Optional equality filters per categorical field plus a time range.
///
/// A record passes an equality filter when its parsed token set for that
/// field contains the filter value, so a chain listed as `"DeFi,Gaming"`
/// matches both a `DeFi` and a `Gaming` filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub framework: Option<String>,
    pub vertical: Option<String>,
    pub data_availability: Option<String>,
    pub l2_or_l3: Option<String>,
    pub raas_provider: Option<String>,
    pub settlement: Option<String>,
    pub time_range: TimeRange,
}

impl FilterCriteria {
    /// Whether a record passes every set equality filter.
    pub fn matches(&self, record: &ChainRecord) -> bool {
        let checks = [
            (CategoryField::Framework, &self.framework),
            (CategoryField::Vertical, &self.vertical),
            (CategoryField::DataAvailability, &self.data_availability),
            (CategoryField::L2OrL3, &self.l2_or_l3),
            (CategoryField::RaasProvider, &self.raas_provider),
            (CategoryField::Settlement, &self.settlement),
        ];

        checks.iter().all(|(field, wanted)| match wanted {
            Some(value) => record.tokens(*field).iter().any(|t| t == value),
            None => true,
        })
    }
}

//! Aggregation engine.
//!
//! Pure, total computation over an enriched registry snapshot: grouping by a
//! categorical field, cross-tabulating two fields, bucketing daily counts
//! into weekly totals, and the dashboard header summary. Every view-specific
//! aggregation of the original dashboard collapses into these parametrized
//! functions.
//!
//! Sentinel / unset values are treated as zero; nothing here performs I/O or
//! can fail on already-loaded data.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::types::{CategoryField, ChainRecord, FilterCriteria, TimeRange};

/// Per-group aggregate for one categorical field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Category token the group belongs to.
    pub key: String,
    /// Number of chains whose token set contains the key.
    pub total_chains: usize,
    /// Sum of member transaction counts, sentinel counted as zero.
    pub total_transactions: u64,
    /// Up to five member names, ranked by transaction count descending,
    /// ties broken by registry order.
    pub top_chains: Vec<String>,
}

/// One cell of a two-field cross-tabulation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CrossTab {
    pub row_key: String,
    pub col_key: String,
    /// Chains whose token sets contain both keys.
    pub count: usize,
}

/// One Monday-aligned bucket of the global weekly transaction series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeeklyBucket {
    pub week_start: NaiveDate,
    pub total_tx_count: u64,
}

/// Headline numbers shown above the dashboard tables.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_chains: usize,
    pub chains_with_explorer: usize,
    pub total_transactions: u64,
    pub transactions_today: u64,
}

/// Number of member names reported per group.
const TOP_CHAINS: usize = 5;

/// Applies the equality filters of `criteria` to a record snapshot.
///
/// The time range is deliberately ignored here; it only affects the weekly
/// series.
pub fn apply_filters(records: &[ChainRecord], criteria: &FilterCriteria) -> Vec<ChainRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Distinct tokens of `field` across `records`, in first-seen order.
fn distinct_tokens(records: &[ChainRecord], field: CategoryField) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut tokens = Vec::new();

    for record in records {
        for token in record.tokens(field) {
            if seen.insert(token.clone()) {
                tokens.push(token);
            }
        }
    }

    tokens
}

/// Groups a record snapshot by one categorical field.
///
/// A record with N tokens in the field joins N groups; records whose token
/// set is empty (sentinel-only) join none. Groups are emitted in first-seen
/// token order, which is deterministic for a fixed input order.
pub fn group_by_category(records: &[ChainRecord], field: CategoryField) -> Vec<GroupSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut members: HashMap<String, Vec<&ChainRecord>> = HashMap::new();

    for record in records {
        for token in record.tokens(field) {
            let group = members.entry(token.clone()).or_insert_with(|| {
                order.push(token.clone());
                Vec::new()
            });
            group.push(record);
        }
    }

    order
        .into_iter()
        .map(|key| {
            let group = &members[&key];

            // Stable sort keeps registry order among equal counts.
            let mut ranked = group.clone();
            ranked.sort_by_key(|r| std::cmp::Reverse(r.total_transactions.unwrap_or(0)));

            let top_chains = ranked
                .iter()
                .take(TOP_CHAINS)
                .map(|r| r.name.clone())
                .collect();

            let total_transactions = group
                .iter()
                .map(|r| r.total_transactions.unwrap_or(0))
                .sum();

            GroupSummary {
                key,
                total_chains: group.len(),
                total_transactions,
                top_chains,
            }
        })
        .collect()
}

/// Cross-tabulates two categorical fields.
///
/// The axes are the first-seen-order token sets present in the data; the
/// output covers the full Cartesian product, zero cells included, so a
/// stacked chart gets complete axes. A chain with multiple tokens in a
/// field contributes to multiple cells.
pub fn cross_tab(
    records: &[ChainRecord],
    field_a: CategoryField,
    field_b: CategoryField,
) -> Vec<CrossTab> {
    let rows = distinct_tokens(records, field_a);
    let cols = distinct_tokens(records, field_b);

    let mut cells = Vec::with_capacity(rows.len() * cols.len());

    for row_key in &rows {
        for col_key in &cols {
            let count = records
                .iter()
                .filter(|r| {
                    r.tokens(field_a).iter().any(|t| t == row_key)
                        && r.tokens(field_b).iter().any(|t| t == col_key)
                })
                .count();

            cells.push(CrossTab {
                row_key: row_key.clone(),
                col_key: col_key.clone(),
                count,
            });
        }
    }

    cells
}

/// Monday-aligned start of the calendar week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Pools every per-chain daily series into a weekly global series.
///
/// Only days with `date >= today - trailing_days` contribute; `today` is
/// passed in so the computation stays pure. Weeks with no contributing days
/// are omitted, not zero-filled.
pub fn weekly_series(
    records: &[ChainRecord],
    range: TimeRange,
    today: NaiveDate,
) -> Vec<WeeklyBucket> {
    let cutoff = range.trailing_days().map(|days| today - Duration::days(days));

    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for record in records {
        for point in &record.daily_tx_series {
            if let Some(cutoff) = cutoff {
                if point.date < cutoff {
                    continue;
                }
            }
            *buckets.entry(week_start(point.date)).or_insert(0) += point.tx_count;
        }
    }

    buckets
        .into_iter()
        .map(|(week_start, total_tx_count)| WeeklyBucket {
            week_start,
            total_tx_count,
        })
        .collect()
}

/// Headline totals over a record snapshot, sentinel counted as zero.
pub fn summarize(records: &[ChainRecord]) -> DashboardSummary {
    DashboardSummary {
        total_chains: records.len(),
        chains_with_explorer: records
            .iter()
            .filter(|r| r.block_explorer_url.is_some())
            .count(),
        total_transactions: records
            .iter()
            .map(|r| r.total_transactions.unwrap_or(0))
            .sum(),
        transactions_today: records
            .iter()
            .map(|r| r.transactions_today.unwrap_or(0))
            .sum(),
    }
}

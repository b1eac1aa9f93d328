//! Enrichment fan-out.
//!
//! For every registry record that carries a block-explorer URL, two
//! independent requests are issued against that explorer: the summary
//! statistics and the daily transaction history. All per-record enrichments
//! run concurrently and the stage completes only once every request has
//! settled; each task owns its own record and no shared state is mutated
//! during the fan-out.
//!
//! Failures are isolated: a timeout or malformed payload on one chain
//! leaves that record at its sentinel values and is reported through the
//! [`EnrichmentReport`], never propagated to the caller.

use chrono::NaiveDate;
use futures::future::join_all;

use crate::explorer::{ExplorerClient, ExplorerError};
use crate::types::ChainRecord;

/// Outcome of enriching a single record.
#[derive(Debug)]
pub enum EnrichmentOutcome {
    /// Both explorer calls succeeded and the record was populated.
    Enriched,
    /// The record has no explorer URL and was passed through untouched.
    Skipped,
    /// One of the explorer calls failed; the record keeps its sentinels.
    Failed(ExplorerError),
}

/// Per-record entry in the enrichment report.
#[derive(Debug)]
pub struct RecordOutcome {
    /// Name of the chain the outcome belongs to.
    pub chain: String,
    pub outcome: EnrichmentOutcome,
}

/// Structured result of one enrichment pass, in registry order.
///
/// This replaces fire-and-forget logging as the primary error channel:
/// callers that care about partial failure inspect the report, observability
/// code feeds the counters into metrics.
#[derive(Debug, Default)]
pub struct EnrichmentReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl EnrichmentReport {
    /// Number of records that were fully enriched.
    pub fn enriched(&self) -> usize {
        self.count(|o| matches!(o, EnrichmentOutcome::Enriched))
    }

    /// Number of records skipped for lack of an explorer URL.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, EnrichmentOutcome::Skipped))
    }

    /// Number of records whose enrichment failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EnrichmentOutcome::Failed(_)))
    }

    /// Iterates over the failed chains and their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ExplorerError)> {
        self.outcomes.iter().filter_map(|entry| match &entry.outcome {
            EnrichmentOutcome::Failed(err) => Some((entry.chain.as_str(), err)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&EnrichmentOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|e| pred(&e.outcome)).count()
    }
}

/// Enriches one record; always returns the record, populated or untouched.
async fn enrich_one<C: ExplorerClient>(
    client: &C,
    mut record: ChainRecord,
    from: NaiveDate,
    to: NaiveDate,
) -> (ChainRecord, EnrichmentOutcome) {
    let Some(base_url) = record.block_explorer_url.clone() else {
        return (record, EnrichmentOutcome::Skipped);
    };

    // The two calls are independent; issue them in parallel.
    let (stats, history) = futures::join!(
        client.stats(&base_url),
        client.tx_history(&base_url, from, to)
    );

    match (stats, history) {
        (Ok(stats), Ok(history)) => {
            record.total_addresses = Some(stats.total_addresses);
            record.total_transactions = Some(stats.total_transactions);
            record.transactions_today = Some(stats.transactions_today);
            record.daily_tx_series = history;
            (record, EnrichmentOutcome::Enriched)
        }
        (Err(err), _) | (_, Err(err)) => {
            tracing::warn!(chain = %record.name, error = %err, "enrichment failed");
            (record, EnrichmentOutcome::Failed(err))
        }
    }
}

/// Runs the enrichment fan-out over a registry snapshot.
///
/// The returned sequence has the same cardinality and order as the input;
/// `join_all` settles every dispatched future and yields results in input
/// order, so the merge is positional. `from..=to` bounds the history
/// request for every chain.
pub async fn enrich<C: ExplorerClient>(
    client: &C,
    records: Vec<ChainRecord>,
    from: NaiveDate,
    to: NaiveDate,
) -> (Vec<ChainRecord>, EnrichmentReport) {
    let tasks = records
        .into_iter()
        .map(|record| enrich_one(client, record, from, to));

    let settled = join_all(tasks).await;

    let mut enriched = Vec::with_capacity(settled.len());
    let mut report = EnrichmentReport::default();

    for (record, outcome) in settled {
        report.outcomes.push(RecordOutcome {
            chain: record.name.clone(),
            outcome,
        });
        enriched.push(record);
    }

    (enriched, report)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::explorer::ExplorerStats;
    use crate::types::DailyTxPoint;

    /// Fake explorer that serves canned stats per base URL and fails for
    /// any URL it does not know about.
    #[derive(Default)]
    struct FakeExplorer {
        stats: HashMap<String, ExplorerStats>,
        history: HashMap<String, Vec<DailyTxPoint>>,
    }

    impl FakeExplorer {
        fn with_chain(mut self, url: &str, total_tx: u64, history: Vec<DailyTxPoint>) -> Self {
            self.stats.insert(
                url.to_string(),
                ExplorerStats {
                    total_addresses: 10,
                    total_transactions: total_tx,
                    transactions_today: 1,
                },
            );
            self.history.insert(url.to_string(), history);
            self
        }
    }

    #[async_trait]
    impl ExplorerClient for FakeExplorer {
        async fn stats(&self, base_url: &str) -> Result<ExplorerStats, ExplorerError> {
            self.stats
                .get(base_url)
                .copied()
                .ok_or_else(|| ExplorerError::Transport(format!("timed out: {base_url}")))
        }

        async fn tx_history(
            &self,
            base_url: &str,
            _from: NaiveDate,
            _to: NaiveDate,
        ) -> Result<Vec<DailyTxPoint>, ExplorerError> {
            self.history
                .get(base_url)
                .cloned()
                .ok_or_else(|| ExplorerError::Transport(format!("timed out: {base_url}")))
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn chain_with_url(name: &str, url: &str) -> ChainRecord {
        let mut rec = ChainRecord::new(name);
        rec.block_explorer_url = Some(url.to_string());
        rec
    }

    fn window() -> (NaiveDate, NaiveDate) {
        (day(2025, 1, 1), day(2025, 12, 31))
    }

    #[tokio::test]
    async fn record_without_url_passes_through_unchanged() {
        let explorer = FakeExplorer::default();
        let original = ChainRecord::new("no-explorer");
        let (from, to) = window();

        let (records, report) = enrich(&explorer, vec![original.clone()], from, to).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0], original);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.enriched(), 0);
        assert_eq!(report.failed(), 0);
    }

    #[tokio::test]
    async fn failure_of_one_chain_is_isolated() {
        let points = vec![DailyTxPoint {
            date: day(2025, 8, 20),
            tx_count: 7,
        }];
        let explorer = FakeExplorer::default()
            .with_chain("https://one.example", 100, points.clone())
            .with_chain("https://three.example", 300, points.clone());

        let records = vec![
            chain_with_url("one", "https://one.example"),
            chain_with_url("two", "https://two.example"), // unknown URL, will time out
            chain_with_url("three", "https://three.example"),
        ];
        let (from, to) = window();

        let (records, report) = enrich(&explorer, records, from, to).await;

        // Order and cardinality are preserved.
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["one", "two", "three"]);

        assert_eq!(records[0].total_transactions, Some(100));
        assert_eq!(records[0].daily_tx_series, points);
        assert_eq!(records[2].total_transactions, Some(300));

        // The failed chain keeps every enrichment field at its sentinel.
        assert!(records[1].total_transactions.is_none());
        assert!(records[1].total_addresses.is_none());
        assert!(records[1].daily_tx_series.is_empty());

        assert_eq!(report.enriched(), 2);
        assert_eq!(report.failed(), 1);
        let failed: Vec<_> = report.failures().map(|(chain, _)| chain).collect();
        assert_eq!(failed, ["two"]);
    }

    /// Explorer whose calls each take one virtual second.
    struct SlowExplorer;

    #[async_trait]
    impl ExplorerClient for SlowExplorer {
        async fn stats(&self, _base_url: &str) -> Result<ExplorerStats, ExplorerError> {
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            Ok(ExplorerStats {
                total_addresses: 1,
                total_transactions: 2,
                transactions_today: 3,
            })
        }

        async fn tx_history(
            &self,
            _base_url: &str,
            from: NaiveDate,
            _to: NaiveDate,
        ) -> Result<Vec<DailyTxPoint>, ExplorerError> {
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            Ok(vec![DailyTxPoint {
                date: from,
                tx_count: 2,
            }])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn explorer_calls_run_concurrently_per_record_and_across_records() {
        let records = vec![
            chain_with_url("one", "https://one.example"),
            chain_with_url("two", "https://two.example"),
            chain_with_url("three", "https://three.example"),
        ];
        let (from, to) = window();

        // Three records with two one-second calls each: fully concurrent
        // execution settles after one virtual second, sequential awaiting
        // would need at least two.
        let started = tokio::time::Instant::now();
        let (records, report) = enrich(&SlowExplorer, records, from, to).await;
        let elapsed = started.elapsed();

        assert!(elapsed < std::time::Duration::from_secs(2), "took {elapsed:?}");
        assert_eq!(report.enriched(), 3);
        assert!(records.iter().all(|r| r.total_transactions == Some(2)));
    }

    #[tokio::test]
    async fn partial_explorer_failure_leaves_all_fields_sentinel() {
        // Stats succeed but history is missing: the record must not be
        // half-populated.
        let mut explorer = FakeExplorer::default();
        explorer.stats.insert(
            "https://half.example".to_string(),
            ExplorerStats {
                total_addresses: 1,
                total_transactions: 2,
                transactions_today: 3,
            },
        );

        let (from, to) = window();
        let (records, report) = enrich(
            &explorer,
            vec![chain_with_url("half", "https://half.example")],
            from,
            to,
        )
        .await;

        assert!(records[0].total_transactions.is_none());
        assert!(records[0].daily_tx_series.is_empty());
        assert_eq!(report.failed(), 1);
    }
}

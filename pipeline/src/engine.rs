//! Pipeline orchestration.
//!
//! [`PipelineEngine`] wires a registry source and an explorer client into
//! the leaf-first control flow: fetch the registry (fatal on error), fan
//! out the enrichment (per-record failures isolated), and hand back an
//! immutable snapshot for aggregation. Every invocation re-fetches and
//! re-enriches from scratch; there is no cross-run cache and no retry.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Utc};

use crate::config::HistoryWindow;
use crate::enrich::{EnrichmentReport, enrich};
use crate::explorer::ExplorerClient;
use crate::metrics::MetricsRegistry;
use crate::registry::{RegistryError, RegistrySource};
use crate::types::ChainRecord;

/// One finished pipeline invocation: the enriched registry snapshot plus
/// the structured enrichment report.
#[derive(Debug)]
pub struct PipelineRun {
    pub records: Vec<ChainRecord>,
    pub report: EnrichmentReport,
}

/// The pipeline engine, generic over its registry and explorer seams.
pub struct PipelineEngine<S, C> {
    source: S,
    explorer: C,
    history: HistoryWindow,
    metrics: Arc<MetricsRegistry>,
}

impl<S, C> PipelineEngine<S, C>
where
    S: RegistrySource,
    C: ExplorerClient,
{
    /// Constructs an engine from its collaborators.
    pub fn new(
        source: S,
        explorer: C,
        history: HistoryWindow,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            source,
            explorer,
            history,
            metrics,
        }
    }

    /// Runs the full pipeline once.
    ///
    /// A registry failure is fatal and surfaces as the error; enrichment
    /// failures are folded into the report and the metrics counters.
    pub async fn run(&self) -> Result<PipelineRun, RegistryError> {
        self.metrics.pipeline.runs_total.inc();

        let fetch_started = Instant::now();
        let records = self.source.fetch().await?;
        self.metrics
            .pipeline
            .registry_fetch_seconds
            .observe(fetch_started.elapsed().as_secs_f64());

        let today = Utc::now().date_naive();
        let from = today - Duration::days(self.history.0);

        let enrich_started = Instant::now();
        let (records, report) = enrich(&self.explorer, records, from, today).await;
        self.metrics
            .pipeline
            .enrichment_seconds
            .observe(enrich_started.elapsed().as_secs_f64());

        self.metrics
            .pipeline
            .records_enriched_total
            .inc_by(report.enriched() as u64);
        self.metrics
            .pipeline
            .records_skipped_total
            .inc_by(report.skipped() as u64);
        self.metrics
            .pipeline
            .enrichment_failures_total
            .inc_by(report.failed() as u64);

        tracing::info!(
            chains = records.len(),
            enriched = report.enriched(),
            skipped = report.skipped(),
            failed = report.failed(),
            "pipeline run complete"
        );

        Ok(PipelineRun { records, report })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::explorer::{ExplorerError, ExplorerStats};
    use crate::types::DailyTxPoint;

    struct FixedSource {
        rows: Vec<ChainRecord>,
    }

    #[async_trait]
    impl RegistrySource for FixedSource {
        async fn fetch(&self) -> Result<Vec<ChainRecord>, RegistryError> {
            Ok(self.rows.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl RegistrySource for BrokenSource {
        async fn fetch(&self) -> Result<Vec<ChainRecord>, RegistryError> {
            Err(RegistryError::Service("HTTP status 500".to_string()))
        }
    }

    /// Explorer that answers every URL with the same canned data.
    struct UniformExplorer;

    #[async_trait]
    impl ExplorerClient for UniformExplorer {
        async fn stats(&self, _base_url: &str) -> Result<ExplorerStats, ExplorerError> {
            Ok(ExplorerStats {
                total_addresses: 5,
                total_transactions: 10,
                transactions_today: 1,
            })
        }

        async fn tx_history(
            &self,
            _base_url: &str,
            from: NaiveDate,
            _to: NaiveDate,
        ) -> Result<Vec<DailyTxPoint>, ExplorerError> {
            Ok(vec![DailyTxPoint {
                date: from,
                tx_count: 10,
            }])
        }
    }

    fn metrics() -> Arc<MetricsRegistry> {
        Arc::new(MetricsRegistry::new().expect("create metrics registry"))
    }

    #[tokio::test]
    async fn run_enriches_and_reports() {
        let mut with_url = ChainRecord::new("a");
        with_url.block_explorer_url = Some("https://a.example".to_string());
        let without_url = ChainRecord::new("b");

        let engine = PipelineEngine::new(
            FixedSource {
                rows: vec![with_url, without_url],
            },
            UniformExplorer,
            HistoryWindow::default(),
            metrics(),
        );

        let run = engine.run().await.expect("pipeline should succeed");
        assert_eq!(run.records.len(), 2);
        assert_eq!(run.records[0].total_transactions, Some(10));
        assert!(run.records[1].total_transactions.is_none());
        assert_eq!(run.report.enriched(), 1);
        assert_eq!(run.report.skipped(), 1);
    }

    #[tokio::test]
    async fn registry_failure_is_fatal() {
        let engine = PipelineEngine::new(
            BrokenSource,
            UniformExplorer,
            HistoryWindow::default(),
            metrics(),
        );

        let err = engine.run().await.expect_err("registry error should surface");
        assert!(matches!(err, RegistryError::Service(_)));
    }
}

//! Prometheus-backed pipeline metrics.
//!
//! This module defines a [`MetricsRegistry`] that owns a Prometheus
//! registry and a set of strongly-typed pipeline metrics. The API gateway
//! serves the text exposition format from [`MetricsRegistry::gather_text`]
//! on its `/metrics` route.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Opts, Registry, TextEncoder};

/// Pipeline-related Prometheus metrics.
///
/// These are registered into a [`Registry`] and updated from the pipeline
/// engine as runs complete.
#[derive(Clone)]
pub struct PipelineMetrics {
    /// Latency of the registry fetch, in seconds.
    pub registry_fetch_seconds: Histogram,
    /// Wall time of the whole enrichment fan-out, in seconds.
    pub enrichment_seconds: Histogram,
    /// Total pipeline invocations.
    pub runs_total: IntCounter,
    /// Records fully enriched across all runs.
    pub records_enriched_total: IntCounter,
    /// Records skipped for lack of an explorer URL.
    pub records_skipped_total: IntCounter,
    /// Isolated per-record enrichment failures.
    pub enrichment_failures_total: IntCounter,
}

impl PipelineMetrics {
    /// Registers pipeline metrics into the given `Registry`.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let registry_fetch_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "pipeline_registry_fetch_seconds",
                "Time to fetch and normalise the chain registry in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(registry_fetch_seconds.clone()))?;

        let enrichment_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "pipeline_enrichment_seconds",
                "Wall time of the explorer enrichment fan-out in seconds",
            )
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(enrichment_seconds.clone()))?;

        let runs_total = IntCounter::with_opts(Opts::new(
            "pipeline_runs_total",
            "Total number of pipeline invocations",
        ))?;
        registry.register(Box::new(runs_total.clone()))?;

        let records_enriched_total = IntCounter::with_opts(Opts::new(
            "pipeline_records_enriched_total",
            "Records whose explorer enrichment fully succeeded",
        ))?;
        registry.register(Box::new(records_enriched_total.clone()))?;

        let records_skipped_total = IntCounter::with_opts(Opts::new(
            "pipeline_records_skipped_total",
            "Records skipped because they carry no explorer URL",
        ))?;
        registry.register(Box::new(records_skipped_total.clone()))?;

        let enrichment_failures_total = IntCounter::with_opts(Opts::new(
            "pipeline_enrichment_failures_total",
            "Isolated per-record enrichment failures",
        ))?;
        registry.register(Box::new(enrichment_failures_total.clone()))?;

        Ok(Self {
            registry_fetch_seconds,
            enrichment_seconds,
            runs_total,
            records_enriched_total,
            records_skipped_total,
            enrichment_failures_total,
        })
    }
}

/// Wrapper around a Prometheus registry and the pipeline metrics.
///
/// This is the handle passed around the gateway; wrap it in an `Arc` to
/// share it across tasks.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Registry,
    pub pipeline: PipelineMetrics,
}

impl MetricsRegistry {
    /// Creates a new `MetricsRegistry` with a fresh underlying `Registry`
    /// and registers the pipeline metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("dashboard".to_string()), None)?;
        let pipeline = PipelineMetrics::register(&registry)?;
        Ok(Self { registry, pipeline })
    }

    /// Encodes all metrics in this registry into the Prometheus text format.
    pub fn gather_text(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("failed to encode Prometheus metrics: {e}");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_metrics_register_and_record() {
        let registry = Registry::new();
        let metrics = PipelineMetrics::register(&registry).expect("register metrics");

        metrics.registry_fetch_seconds.observe(0.2);
        metrics.enrichment_seconds.observe(1.5);
        metrics.runs_total.inc();
        metrics.records_enriched_total.inc_by(12);
        metrics.enrichment_failures_total.inc();

        assert!(!registry.gather().is_empty());
    }

    #[test]
    fn metrics_registry_gather_text_works() {
        let registry = MetricsRegistry::new().expect("create metrics registry");
        registry.pipeline.runs_total.inc();
        let text = registry.gather_text();
        assert!(text.contains("pipeline_runs_total"));
    }
}

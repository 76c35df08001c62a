use anyhow::Result;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token metrics
    pub token_requests: IntCounter,
    pub token_failures: IntCounterVec,
    pub token_cache_hits: IntCounter,
    pub token_fetch_duration: HistogramVec,

    // Resource metrics
    pub sync_rows: IntCounterVec,
    pub sync_failures: IntCounterVec,

    // Snapshot metrics
    pub snapshot_writes: IntCounterVec,
    pub snapshot_failures: IntCounterVec,

    pub up: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new_custom(Some("xerosync".into()), None)?;

        let metrics = Self {
            // Token
            token_requests: IntCounter::new("token_requests_total", "Token endpoint exchanges attempted")?,
            token_failures: IntCounterVec::new(Opts::new("token_failures_total", "Token exchange failures by reason"), &["reason"])?,
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Token requests served from the cache")?,
            token_fetch_duration: HistogramVec::new(HistogramOpts::new("token_fetch_duration_seconds", "Token exchange duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]), &["outcome"])?,

            // Resource
            sync_rows: IntCounterVec::new(Opts::new("sync_rows_total", "Rows fetched per resource"), &["resource"])?,
            sync_failures: IntCounterVec::new(Opts::new("sync_failures_total", "Sync failures per resource and kind"), &["resource", "kind"])?,

            // Snapshot
            snapshot_writes: IntCounterVec::new(Opts::new("snapshot_writes_total", "Snapshot files written"), &["file"])?,
            snapshot_failures: IntCounterVec::new(Opts::new("snapshot_failures_total", "Snapshot write failures"), &["file"])?,

            up: IntGauge::new("up", "1 if service is serving")?,

            registry,
        };

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_requests.clone()))?;
        reg.register(Box::new(metrics.token_failures.clone()))?;
        reg.register(Box::new(metrics.token_cache_hits.clone()))?;
        reg.register(Box::new(metrics.token_fetch_duration.clone()))?;
        reg.register(Box::new(metrics.sync_rows.clone()))?;
        reg.register(Box::new(metrics.sync_failures.clone()))?;
        reg.register(Box::new(metrics.snapshot_writes.clone()))?;
        reg.register(Box::new(metrics.snapshot_failures.clone()))?;
        reg.register(Box::new(metrics.up.clone()))?;

        Ok(metrics)
    }
}

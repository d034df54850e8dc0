// src/metrics/collector.rs
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    /// Text exposition of everything recorded so far.
    pub fn gather(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

pub struct MetricsCollector {
    pub checks_total: IntCounterVec,
    pub check_duration_seconds: HistogramVec,
    pub sites_alive: IntGauge,
    pub sites_dead: IntGauge,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let checks_total = IntCounterVec::new(
            Opts::new("keeperupper_checks_total", "Site checks by outcome"),
            &["site", "status"],
        )?;
        registry.register(Box::new(checks_total.clone()))?;

        let check_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "keeperupper_check_duration_seconds",
                "Time spent waiting for each site",
            ),
            &["site"],
        )?;
        registry.register(Box::new(check_duration_seconds.clone()))?;

        let sites_alive = IntGauge::new("keeperupper_sites_alive", "Sites found alive")?;
        registry.register(Box::new(sites_alive.clone()))?;

        let sites_dead = IntGauge::new("keeperupper_sites_dead", "Sites found dead")?;
        registry.register(Box::new(sites_dead.clone()))?;

        Ok(Self {
            checks_total,
            check_duration_seconds,
            sites_alive,
            sites_dead,
        })
    }

    pub fn record_check(&self, site: &str, status: &str, duration: Duration) {
        self.checks_total.with_label_values(&[site, status]).inc();

        self.check_duration_seconds
            .with_label_values(&[site])
            .observe(duration.as_secs_f64());
    }

    pub fn update_site_counts(&self, alive: usize, dead: usize) {
        self.sites_alive.set(alive as i64);
        self.sites_dead.set(dead as i64);
    }
}

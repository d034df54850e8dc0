// src/health/checker.rs
use crate::client::{FetchError, Fetcher};
use crate::config::SiteSpec;
use crate::error::{Error, Result};
use crate::health::{CheckOutcome, ResultSet, SiteStatus};
use crate::metrics::MetricsCollector;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What to do when a request fails for any reason other than a timeout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportPolicy {
    /// Stop the run and report the failure.
    #[default]
    Abort,
    /// Count the site as dead and keep going.
    MarkDead,
}

pub struct HealthChecker<F> {
    fetcher: F,
    policy: TransportPolicy,
    metrics: Option<Arc<MetricsCollector>>,
}

impl<F: Fetcher> HealthChecker<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            policy: TransportPolicy::default(),
            metrics: None,
        }
    }

    pub fn with_policy(mut self, policy: TransportPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Check every site once, one after another, in the order given.
    pub async fn check(&self, specs: &[SiteSpec], timeout_override: Option<u64>) -> Result<ResultSet> {
        let mut results = ResultSet::new();

        for spec in specs {
            let outcome = self.check_site(spec, timeout_override).await?;
            results.record(outcome);
        }

        if let Some(metrics) = &self.metrics {
            metrics.update_site_counts(results.alive.len(), results.dead.len());
        }

        info!(
            "Site check complete: {} alive, {} dead",
            results.alive.len(),
            results.dead.len()
        );

        Ok(results)
    }

    pub async fn check_site(&self, spec: &SiteSpec, timeout_override: Option<u64>) -> Result<CheckOutcome> {
        let limit = spec.effective_timeout(timeout_override);
        let start = Instant::now();

        let result = self.fetcher.fetch(&spec.url, limit).await;
        let elapsed = start.elapsed();

        let status = match result {
            Ok(code) if code == spec.expected_status => {
                debug!("Site {} answered {} in {:?}", spec.name, code, elapsed);
                SiteStatus::Alive
            }
            Ok(code) => {
                debug!(
                    "Site {} answered {}, expected {}",
                    spec.name, code, spec.expected_status
                );
                SiteStatus::Dead
            }
            Err(FetchError::Timeout { .. }) => {
                warn!("Site {} did not answer within {:?}", spec.name, limit);
                SiteStatus::Dead
            }
            Err(FetchError::Transport(reason)) => match self.policy {
                TransportPolicy::MarkDead => {
                    warn!("Site {} is unreachable: {}", spec.name, reason);
                    SiteStatus::Dead
                }
                TransportPolicy::Abort => {
                    if let Some(metrics) = &self.metrics {
                        metrics.record_check(&spec.name, "error", elapsed);
                    }
                    return Err(Error::Transport {
                        site: spec.name.clone(),
                        url: spec.url.clone(),
                        reason,
                    });
                }
            },
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_check(&spec.name, status.as_str(), elapsed);
        }

        Ok(CheckOutcome {
            name: spec.name.clone(),
            status,
        })
    }
}

/// Narrow the configured sites to the one requested by name, if any.
/// Runs before any request goes out.
pub fn select_sites<'a>(specs: &'a [SiteSpec], name: Option<&str>, config: &Path) -> Result<&'a [SiteSpec]> {
    let Some(name) = name else {
        return Ok(specs);
    };

    specs
        .iter()
        .find(|spec| spec.name == name)
        .map(std::slice::from_ref)
        .ok_or_else(|| Error::SiteNotFound {
            name: name.to_string(),
            config: config.to_path_buf(),
        })
}

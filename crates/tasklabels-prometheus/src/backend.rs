use std::sync::Arc;

use prometheus::{Counter, CounterVec, Opts, Registry, proto::MetricFamily};

use tasklabels_core::{MetricsBackend, ScopeMode};

/// Prometheus metrics backend for tasklabels.
///
/// ## Metrics
/// - `tasklabels_scopes_entered_total{mode}` - label scopes installed
/// - `tasklabels_merge_failures_total` - overrides rejected by the merge capability
/// - `tasklabels_unsupported_total{reason}` - calls refused by the feature gate
///
/// ## Label cardinality
/// All labels are bounded:
/// - `mode`: "async", "sync"
/// - `reason`: "explicitly_disabled", "requires_experimental_flag", "unsupported_version"
#[derive(Clone)]
pub struct PrometheusMetrics {
    scopes_entered: CounterVec,
    merge_failures: Counter,
    unsupported: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a new prometheus metrics backend with custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let scopes_entered = CounterVec::new(
            Opts::new("scopes_entered_total", "Total number of label scopes entered")
                .namespace("tasklabels"),
            &["mode"],
        )?;
        registry.register(Box::new(scopes_entered.clone()))?;

        let merge_failures = Counter::with_opts(
            Opts::new("merge_failures_total", "Total label merges rejected").namespace("tasklabels"),
        )?;
        registry.register(Box::new(merge_failures.clone()))?;

        let unsupported = CounterVec::new(
            Opts::new(
                "unsupported_total",
                "Total calls refused because async context frames are unavailable",
            )
            .namespace("tasklabels"),
            &["reason"],
        )?;
        registry.register(Box::new(unsupported.clone()))?;

        Ok(Self {
            scopes_entered,
            merge_failures,
            unsupported,
            registry,
        })
    }

    /// Create a new prometheus metrics backend with a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Underlying registry, for registering application metrics alongside.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_scope_entered(&self, mode: ScopeMode) {
        self.scopes_entered
            .with_label_values(&[mode.as_label()])
            .inc();
    }

    fn record_merge_failed(&self) {
        self.merge_failures.inc();
    }

    fn record_unsupported(&self, reason: &str) {
        self.unsupported.with_label_values(&[reason]).inc();
    }
}

use crate::metrics::backend::{MetricsBackend, ScopeMode};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_scope_entered(&self, _: ScopeMode) {}

    #[inline(always)]
    fn record_merge_failed(&self) {}

    #[inline(always)]
    fn record_unsupported(&self, _: &str) {}
}

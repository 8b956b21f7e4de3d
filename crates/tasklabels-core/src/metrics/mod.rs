//! Metrics collection abstraction for label propagation.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected via [`crate::LabelContext::with_metrics`].
mod backend;
pub use backend::{MetricsBackend, MetricsHandle, ScopeMode};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}

use std::sync::Arc;

/// How a label scope was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMode {
    /// Scope wraps a future and survives its suspension points.
    Async,
    /// Scope wraps a synchronous closure.
    Sync,
}

impl ScopeMode {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ScopeMode::Async => "async",
            ScopeMode::Sync => "sync",
        }
    }
}

/// Backend metrics collection interface for label propagation.
///
/// Implementations are injected into [`crate::LabelContext`] and shared by every scope it opens.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a new label scope being installed.
    ///
    /// Not called in passthrough mode, where no scope is installed.
    fn record_scope_entered(&self, mode: ScopeMode);
    /// Record a merge capability rejecting the supplied overrides.
    fn record_merge_failed(&self);
    /// Record a call refused because the runtime lacks async context frames.
    ///
    /// # Arguments
    /// - `reason`: stable reason label (see [`crate::gate::Unavailable::as_label`])
    fn record_unsupported(&self, reason: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;

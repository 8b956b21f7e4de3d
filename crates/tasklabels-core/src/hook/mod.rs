//! Registration hook for third-party readers of the ambient labels.
//!
//! A profiler or exporter that samples the process on its own schedule
//! cannot call through the public API. Instead it receives the
//! [`StoreHandle`] once, when the store is initialized, and reads
//! [`StoreHandle::current`] from whatever task it observes.
use std::sync::Arc;

use crate::store::StoreHandle;

mod noop;
pub use noop::NoOpObserver;

/// Observer notified when a label store becomes ready.
pub trait LabelObserver: Send + Sync + 'static {
    /// Called exactly once per store, right after initialization succeeds.
    fn register(&self, store: &StoreHandle);
}

/// Shared handle to a label observer.
pub type ObserverHandle = Arc<dyn LabelObserver>;

/// Create a no-op observer handle.
#[inline]
pub fn noop_observer() -> ObserverHandle {
    Arc::new(NoOpObserver)
}

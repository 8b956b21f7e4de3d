//! Ambient key/value labels for the running task.
//!
//! [`LabelContext::with_labels`] installs a label set for a unit of work and
//! everything it awaits; [`LabelContext::cur_labels`] reads it back from
//! anywhere inside. Label sets are immutable: nested scopes merge their
//! overrides onto a copy of the parent set.
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod hook;
pub mod merge;
pub mod metrics;
pub mod platform;
pub mod store;

pub use api::{cur_labels, global, install, spawn, with_labels, with_labels_sync};
pub use config::{LabelsConfig, PropagationMode};
pub use context::LabelContext;
pub use error::{LabelsError, LabelsResult};
pub use gate::{Availability, Unavailable, check_availability};
pub use hook::{LabelObserver, NoOpObserver, ObserverHandle, noop_observer};
pub use merge::{MergeHandle, MergeLabels, PairwiseMerge, default_merge};
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, ScopeMode, noop_metrics};
pub use platform::Platform;
pub use store::{ContextStore, StoreHandle, StoreId, propagate};

pub use tasklabels_model::{LabelSet, LabelValue, label_values};

pub mod prelude {
    pub use crate::context::LabelContext;
    pub use crate::error::{LabelsError, LabelsResult};
    pub use crate::hook::LabelObserver;
    pub use crate::merge::MergeLabels;
    pub use crate::store::StoreHandle;
    pub use tasklabels_model::{LabelSet, LabelValue, label_values};
}

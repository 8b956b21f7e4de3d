//! Merge capability building a child [`LabelSet`] from its parent and overrides.
//!
//! The representation of label sets and the pairing of override values are
//! owned by the implementation injected into [`crate::LabelContext`].
//! [`PairwiseMerge`] is the default.
use std::sync::Arc;

use tasklabels_model::{LabelSet, LabelValue, ModelResult};

mod pairwise;
pub use pairwise::PairwiseMerge;

/// Builds label sets for new scopes.
///
/// Implementations must be deterministic for identical inputs and must not
/// alter `parent`; the returned set is fully materialized.
pub trait MergeLabels: Send + Sync + 'static {
    fn build(&self, parent: Option<&LabelSet>, overrides: &[LabelValue]) -> ModelResult<LabelSet>;
}

/// Shared handle to a merge capability.
pub type MergeHandle = Arc<dyn MergeLabels>;

/// Create the default merge handle.
#[inline]
pub fn default_merge() -> MergeHandle {
    Arc::new(PairwiseMerge)
}

use std::{collections::BTreeMap, future::Future, sync::Arc};

use tasklabels_model::LabelSet;

use crate::store::StoreId;

tokio::task_local! {
    static FRAME: Frame;
}

/// Snapshot of every store's label set for the running task.
///
/// Frames are persistent: installing labels copies the map and never touches
/// the frame a parent scope is still holding.
#[derive(Debug, Clone, Default)]
pub(crate) struct Frame(Arc<BTreeMap<StoreId, LabelSet>>);

impl Frame {
    /// Frame of the running task, or an empty one outside any scope.
    pub(crate) fn current() -> Frame {
        FRAME.try_with(Clone::clone).unwrap_or_default()
    }

    pub(crate) fn get(&self, id: StoreId) -> Option<LabelSet> {
        self.0.get(&id).cloned()
    }

    /// New frame equal to `self` with `labels` installed for `id`.
    pub(crate) fn with(&self, id: StoreId, labels: LabelSet) -> Frame {
        let mut next = self.0.as_ref().clone();
        next.insert(id, labels);
        Frame(Arc::new(next))
    }

    pub(crate) fn scope<F>(self, fut: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        FRAME.scope(self, fut)
    }

    pub(crate) fn sync_scope<F, R>(self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        FRAME.sync_scope(self, f)
    }
}

/// Carry the labels visible right now into `fut`, wherever it ends up being polled.
///
/// Task-locals are not inherited by `tokio::spawn`; wrap the future before
/// spawning it to keep the ambient labels of every store.
pub fn propagate<F>(fut: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    Frame::current().scope(fut)
}

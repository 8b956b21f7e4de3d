//! Task-scoped storage of the current [`LabelSet`].
//!
//! The store is lazily initialized: the first [`ContextStore::ensure`] call
//! evaluates the feature gate, caches the verdict, and on success creates the
//! single [`StoreHandle`] that every later call reuses. Values live in a tokio
//! task-local frame, so each logical task sees its own branch of the context.
use std::{
    fmt,
    future::Future,
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

use tasklabels_model::{EnvironmentDescriptor, FramePolicy, LabelSet};
use tracing::{debug, trace};

use crate::{
    error::{LabelsError, LabelsResult},
    gate::{Availability, check_availability},
    hook::{ObserverHandle, noop_observer},
};

mod frame;
pub use frame::propagate;
pub(crate) use frame::Frame;

/// Process-wide sequence for store identifiers.
static STORE_SEQ: AtomicU64 = AtomicU64::new(1);

/// Identifier of one initialized store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreId(u64);

impl StoreId {
    fn next() -> Self {
        Self(STORE_SEQ.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store-{:x}", self.0)
    }
}

/// Handle to an initialized store.
///
/// Cheap to clone. This is what the registration hook hands to external readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHandle {
    id: StoreId,
}

impl StoreHandle {
    fn new() -> Self {
        Self { id: StoreId::next() }
    }

    #[inline]
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Labels installed for the calling task, if any.
    pub fn current(&self) -> Option<LabelSet> {
        Frame::current().get(self.id)
    }

    /// Run `fut` with `labels` installed, across every suspension point inside it.
    ///
    /// The parent frame is captured now, not on first poll.
    pub fn scope<F>(&self, labels: LabelSet, fut: F) -> impl Future<Output = F::Output> + use<F>
    where
        F: Future,
    {
        trace!(store = %self.id, labels = %labels, "entering async label scope");
        self.frame_with(labels).scope(fut)
    }

    /// Run `f` with `labels` installed.
    ///
    /// The previous labels are back in place when `f` returns or unwinds.
    pub fn sync_scope<F, R>(&self, labels: LabelSet, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        trace!(store = %self.id, labels = %labels, "entering sync label scope");
        self.frame_with(labels).sync_scope(f)
    }

    /// Frame of the calling task with `labels` installed for this store.
    pub(crate) fn frame_with(&self, labels: LabelSet) -> Frame {
        Frame::current().with(self.id, labels)
    }
}

/// Lazily initialized label store guarded by the feature gate.
pub struct ContextStore {
    env: EnvironmentDescriptor,
    policy: FramePolicy,
    observer: ObserverHandle,
    verdict: OnceLock<Availability>,
    handle: OnceLock<StoreHandle>,
}

impl ContextStore {
    /// Create an uninitialized store for the given runtime description.
    pub fn new(env: EnvironmentDescriptor, policy: FramePolicy) -> Self {
        Self {
            env,
            policy,
            observer: noop_observer(),
            verdict: OnceLock::new(),
            handle: OnceLock::new(),
        }
    }

    /// Replace the registration hook.
    ///
    /// Only effective before the store is initialized.
    pub fn with_observer(mut self, observer: ObserverHandle) -> Self {
        self.observer = observer;
        self
    }

    /// Replace the gate thresholds.
    ///
    /// Only effective before the verdict is first evaluated.
    pub fn with_policy(mut self, policy: FramePolicy) -> Self {
        self.policy = policy;
        self.verdict = OnceLock::new();
        self
    }

    pub fn env(&self) -> &EnvironmentDescriptor {
        &self.env
    }

    pub fn policy(&self) -> &FramePolicy {
        &self.policy
    }

    /// Feature gate verdict, evaluated once and cached.
    pub fn verdict(&self) -> &Availability {
        self.verdict
            .get_or_init(|| check_availability(&self.env, &self.policy))
    }

    /// Returns `true` once a handle has been created.
    pub fn is_ready(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Get the store handle, initializing it on first use.
    ///
    /// Fails with [`LabelsError::UnsupportedRuntime`] while the gate verdict is unavailable;
    /// the store then stays uninitialized.
    /// Concurrent first calls share one handle and the observer is notified once.
    pub fn ensure(&self) -> LabelsResult<&StoreHandle> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle);
        }

        if let Availability::Unavailable(reason) = self.verdict() {
            return Err(LabelsError::UnsupportedRuntime(reason.clone()));
        }

        let mut created = false;
        let handle = self.handle.get_or_init(|| {
            created = true;
            StoreHandle::new()
        });

        if created {
            debug!(store = %handle.id(), major = self.env.major, "label store initialized");
            self.observer.register(handle);
        }
        Ok(handle)
    }

    /// Labels for the calling task; `None` when uninitialized or nothing is installed.
    pub fn current(&self) -> Option<LabelSet> {
        self.handle.get().and_then(StoreHandle::current)
    }
}

impl fmt::Debug for ContextStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextStore")
            .field("env", &self.env)
            .field("verdict", &self.verdict.get())
            .field("handle", &self.handle.get())
            .field("observer", &"<handle>")
            .finish()
    }
}

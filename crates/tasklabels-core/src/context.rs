use std::{fmt, future::Future};

use tasklabels_model::{EnvironmentDescriptor, FramePolicy, LabelSet, LabelValue};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::{
    config::LabelsConfig,
    error::{LabelsError, LabelsResult},
    hook::ObserverHandle,
    merge::{MergeHandle, default_merge},
    metrics::{MetricsHandle, ScopeMode, noop_metrics},
    platform::Platform,
    store::{ContextStore, StoreHandle, propagate},
};

enum Propagation {
    Propagating(ContextStore),
    Passthrough,
}

/// Entry point for attaching labels to the running task and reading them back.
///
/// A context either propagates labels through a [`ContextStore`] or, on
/// platforms that cannot host them, passes every call straight through:
/// [`LabelContext::with_labels`] just runs the wrapped work and
/// [`LabelContext::cur_labels`] returns `None`.
pub struct LabelContext {
    propagation: Propagation,
    merge: MergeHandle,
    metrics: MetricsHandle,
}

impl LabelContext {
    /// Create a context for `env`, propagating only if the platform probe allows it.
    pub fn new(env: EnvironmentDescriptor) -> Self {
        Self::for_platform(Platform::probe(), env, FramePolicy::default())
    }

    /// Create a propagating context regardless of the platform probe.
    pub fn propagating(env: EnvironmentDescriptor) -> Self {
        Self::for_platform(Platform::Capable, env, FramePolicy::default())
    }

    /// Create a context where every operation is a passthrough.
    pub fn passthrough() -> Self {
        Self {
            propagation: Propagation::Passthrough,
            merge: default_merge(),
            metrics: noop_metrics(),
        }
    }

    /// Create a context from configuration.
    pub fn from_config(cfg: &LabelsConfig) -> LabelsResult<Self> {
        let platform = Platform::resolve(cfg.propagation);
        Ok(Self::for_platform(
            platform,
            cfg.environment()?,
            cfg.policy.clone(),
        ))
    }

    fn for_platform(platform: Platform, env: EnvironmentDescriptor, policy: FramePolicy) -> Self {
        let propagation = if platform.is_capable() {
            Propagation::Propagating(ContextStore::new(env, policy))
        } else {
            Propagation::Passthrough
        };

        Self {
            propagation,
            merge: default_merge(),
            metrics: noop_metrics(),
        }
    }

    /// Replace the gate thresholds. Only effective before first use.
    pub fn with_policy(mut self, policy: FramePolicy) -> Self {
        self.propagation = match self.propagation {
            Propagation::Propagating(store) => Propagation::Propagating(store.with_policy(policy)),
            Propagation::Passthrough => Propagation::Passthrough,
        };
        self
    }

    /// Replace the merge capability.
    pub fn with_merge(mut self, merge: MergeHandle) -> Self {
        self.merge = merge;
        self
    }

    /// Replace the registration hook. Only effective before first use.
    pub fn with_observer(mut self, observer: ObserverHandle) -> Self {
        self.propagation = match self.propagation {
            Propagation::Propagating(store) => Propagation::Propagating(store.with_observer(observer)),
            Propagation::Passthrough => Propagation::Passthrough,
        };
        self
    }

    /// Replace the metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns `true` unless this context is a passthrough.
    pub fn is_propagating(&self) -> bool {
        matches!(self.propagation, Propagation::Propagating(_))
    }

    /// Underlying store, absent for passthrough contexts.
    pub fn store(&self) -> Option<&ContextStore> {
        match &self.propagation {
            Propagation::Propagating(store) => Some(store),
            Propagation::Passthrough => None,
        }
    }

    /// Labels installed for the running task.
    ///
    /// Fails with [`LabelsError::UnsupportedRuntime`] if the runtime cannot carry them.
    pub fn cur_labels(&self) -> LabelsResult<Option<LabelSet>> {
        match &self.propagation {
            Propagation::Propagating(store) => Ok(self.ensure(store)?.current()),
            Propagation::Passthrough => Ok(None),
        }
    }

    /// Run `fut` with the current labels merged with `overrides`.
    ///
    /// The gate check, the parent read and the merge happen at the call, so
    /// errors surface before any of `fut` runs. The returned future keeps the
    /// new labels across every suspension inside `fut` and restores the
    /// previous ones once it completes or is dropped.
    pub fn with_labels<F>(
        &self,
        overrides: &[LabelValue],
        fut: F,
    ) -> LabelsResult<impl Future<Output = F::Output> + use<F>>
    where
        F: Future,
    {
        let frame = self
            .enter(overrides, ScopeMode::Async)?
            .map(|(handle, labels)| handle.frame_with(labels));

        Ok(async move {
            match frame {
                Some(frame) => frame.scope(fut).await,
                None => fut.await,
            }
        })
    }

    /// Run `f` with the current labels merged with `overrides`.
    ///
    /// The previous labels are restored when `f` returns or panics.
    pub fn with_labels_sync<F, R>(&self, overrides: &[LabelValue], f: F) -> LabelsResult<R>
    where
        F: FnOnce() -> R,
    {
        match self.enter(overrides, ScopeMode::Sync)? {
            Some((handle, labels)) => Ok(handle.sync_scope(labels, f)),
            None => Ok(f()),
        }
    }

    /// Carry the labels visible now into `fut`.
    pub fn bind<F>(&self, fut: F) -> impl Future<Output = F::Output> + use<F>
    where
        F: Future,
    {
        propagate(fut)
    }

    /// Spawn `fut` on the tokio runtime, keeping the labels visible now.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        tokio::spawn(self.bind(fut))
    }

    fn ensure<'a>(&self, store: &'a ContextStore) -> LabelsResult<&'a StoreHandle> {
        store.ensure().inspect_err(|e| {
            if let LabelsError::UnsupportedRuntime(reason) = e {
                self.metrics.record_unsupported(reason.as_label());
            }
        })
    }

    /// Build the labels for a new scope, or `None` for passthrough contexts.
    fn enter(
        &self,
        overrides: &[LabelValue],
        mode: ScopeMode,
    ) -> LabelsResult<Option<(StoreHandle, LabelSet)>> {
        let Propagation::Propagating(store) = &self.propagation else {
            return Ok(None);
        };

        let handle = self.ensure(store)?;
        let parent = handle.current();
        let labels = self
            .merge
            .build(parent.as_ref(), overrides)
            .map_err(|e| {
                warn!(error = %e, overrides = overrides.len(), "label merge rejected overrides");
                self.metrics.record_merge_failed();
                LabelsError::from(e)
            })?;

        self.metrics.record_scope_entered(mode);
        Ok(Some((handle.clone(), labels)))
    }
}

impl fmt::Debug for LabelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("LabelContext");
        match &self.propagation {
            Propagation::Propagating(store) => d.field("store", store),
            Propagation::Passthrough => d.field("store", &"<passthrough>"),
        };
        d.field("merge", &"<handle>")
            .field("metrics", &"<handle>")
            .finish()
    }
}

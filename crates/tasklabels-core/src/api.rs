//! Process-wide label context.
//!
//! Most instrumentation code wants a single context shared by the whole
//! process. [`install`] sets it explicitly; otherwise the first call through
//! this module builds one from `TASKLABELS_*` environment variables.
use std::{future::Future, sync::OnceLock};

use tasklabels_model::{LabelSet, LabelValue};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    config::LabelsConfig,
    context::LabelContext,
    error::{LabelsError, LabelsResult},
};

static GLOBAL: OnceLock<LabelContext> = OnceLock::new();

/// Install the process-wide context.
///
/// Fails with [`LabelsError::AlreadyInstalled`] if one is already in place,
/// including one built lazily by an earlier call.
pub fn install(ctx: LabelContext) -> LabelsResult<()> {
    GLOBAL.set(ctx).map_err(|_| LabelsError::AlreadyInstalled)
}

/// Process-wide context, built from the environment on first use.
///
/// When several callers race, one context wins and all of them share it.
pub fn global() -> LabelsResult<&'static LabelContext> {
    if let Some(ctx) = GLOBAL.get() {
        return Ok(ctx);
    }

    let cfg = LabelsConfig::from_env()?;
    let ctx = LabelContext::from_config(&cfg)?;
    debug!(propagation = %cfg.propagation, "process-wide label context built from environment");
    Ok(GLOBAL.get_or_init(|| ctx))
}

/// Labels installed for the running task. See [`LabelContext::cur_labels`].
pub fn cur_labels() -> LabelsResult<Option<LabelSet>> {
    global()?.cur_labels()
}

/// Run `fut` with extra labels. See [`LabelContext::with_labels`].
pub fn with_labels<F>(
    overrides: &[LabelValue],
    fut: F,
) -> LabelsResult<impl Future<Output = F::Output> + use<F>>
where
    F: Future,
{
    global()?.with_labels(overrides, fut)
}

/// Run `f` with extra labels. See [`LabelContext::with_labels_sync`].
pub fn with_labels_sync<F, R>(overrides: &[LabelValue], f: F) -> LabelsResult<R>
where
    F: FnOnce() -> R,
{
    global()?.with_labels_sync(overrides, f)
}

/// Spawn `fut` keeping the current labels. See [`LabelContext::spawn`].
pub fn spawn<F>(fut: F) -> LabelsResult<JoinHandle<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    Ok(global()?.spawn(fut))
}

//! Tracing integration for the ambient labels.
//!
//! [`LogObserver`] is a registration hook: it logs when a label store comes up
//! and keeps the handle so events can be tagged with the labels of whatever
//! task emits them. [`labels_span`] does the same for a span.
use std::sync::OnceLock;

use tasklabels_core::{LabelContext, LabelObserver, LabelSet, StoreHandle};
use tracing::{Span, debug, field, info, info_span};

/// Observer that logs store registration and reads labels back on demand.
#[derive(Debug, Default)]
pub struct LogObserver {
    handle: OnceLock<StoreHandle>,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle received at registration, if the store is up.
    pub fn handle(&self) -> Option<&StoreHandle> {
        self.handle.get()
    }

    /// Labels of the calling task as seen through the registered handle.
    pub fn current(&self) -> Option<LabelSet> {
        self.handle.get().and_then(StoreHandle::current)
    }

    /// Emit `message` at info level with the calling task's labels attached.
    pub fn log_current(&self, message: &str) {
        match self.current() {
            Some(labels) => info!(labels = %labels, "{message}"),
            None => info!("{message}"),
        }
    }
}

impl LabelObserver for LogObserver {
    fn register(&self, store: &StoreHandle) {
        if self.handle.set(store.clone()).is_err() {
            debug!(store = %store.id(), "observer already holds a store; ignoring");
            return;
        }
        info!(store = %store.id(), "label store registered");
    }
}

/// Info span named `labels` carrying `scope` and the current labels of `ctx`.
///
/// Outside any label scope, or when `ctx` cannot propagate, the `labels` field stays empty.
pub fn labels_span(ctx: &LabelContext, scope: &str) -> Span {
    let span = info_span!("labels", scope, labels = field::Empty);
    if let Ok(Some(labels)) = ctx.cur_labels() {
        span.record("labels", field::display(&labels));
    }
    span
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tasklabels_core::label_values;
    use tasklabels_model::EnvironmentDescriptor;

    use super::*;

    fn context(observer: Arc<LogObserver>) -> LabelContext {
        LabelContext::propagating(EnvironmentDescriptor::with_major(24)).with_observer(observer)
    }

    #[test]
    fn unregistered_observer_sees_nothing() {
        let observer = LogObserver::new();
        assert!(observer.handle().is_none());
        assert!(observer.current().is_none());
        observer.log_current("no store yet");
    }

    #[test]
    fn registration_keeps_first_handle() {
        let observer = Arc::new(LogObserver::new());
        let ctx = context(observer.clone());

        let seen = ctx
            .with_labels_sync(&label_values!["job", "compact"], || observer.current())
            .unwrap();

        let store = ctx.store().unwrap().ensure().unwrap();
        assert_eq!(observer.handle(), Some(store));
        assert_eq!(seen.unwrap().get("job"), Some("compact"));
        assert!(observer.current().is_none());
    }

    #[test]
    fn second_store_is_ignored() {
        let observer = Arc::new(LogObserver::new());
        let first = context(observer.clone());
        let second = context(observer.clone());

        let a = first.store().unwrap().ensure().unwrap().id();
        second.store().unwrap().ensure().unwrap();

        assert_eq!(observer.handle().map(StoreHandle::id), Some(a));
    }

    #[tokio::test]
    async fn observer_reads_labels_across_awaits() {
        let observer = Arc::new(LogObserver::new());
        let ctx = context(observer.clone());

        let fut = ctx
            .with_labels(&label_values!["request", 7], {
                let observer = observer.clone();
                async move {
                    tokio::task::yield_now().await;
                    observer.log_current("handling request");
                    observer.current()
                }
            })
            .unwrap();

        assert_eq!(fut.await.unwrap().get("request"), Some("7"));
    }

    #[test]
    fn span_is_built_inside_and_outside_scopes() {
        let ctx = context(Arc::new(LogObserver::new()));

        let _outside = labels_span(&ctx, "idle");
        ctx.with_labels_sync(&label_values!["tenant", "acme"], || {
            let span = labels_span(&ctx, "request");
            let _entered = span.enter();
        })
        .unwrap();

        let _passthrough = labels_span(&LabelContext::passthrough(), "idle");
    }
}

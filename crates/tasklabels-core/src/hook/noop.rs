use crate::{hook::LabelObserver, store::StoreHandle};

/// Observer that ignores registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl LabelObserver for NoOpObserver {
    #[inline(always)]
    fn register(&self, _: &StoreHandle) {}
}

use crate::config::PropagationMode;

/// Whether the platform can host ambient labels at all.
///
/// External readers of the label store (native profilers) exist on Linux only;
/// elsewhere every label operation degrades to a passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Capable,
    Incapable,
}

impl Platform {
    /// Probe the platform this binary was built for.
    #[inline]
    pub const fn probe() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Capable
        } else {
            Platform::Incapable
        }
    }

    /// Apply a configured override on top of the probe.
    pub const fn resolve(mode: PropagationMode) -> Self {
        match mode {
            PropagationMode::Auto => Self::probe(),
            PropagationMode::Enabled => Platform::Capable,
            PropagationMode::Disabled => Platform::Incapable,
        }
    }

    #[inline]
    pub const fn is_capable(&self) -> bool {
        matches!(self, Platform::Capable)
    }
}

//! Runtime feature gate for ambient label propagation.
//!
//! Propagation needs the host runtime to carry contextual state across
//! asynchronous suspension points (an "async context frame"). Whether that is
//! available depends only on the runtime major version and its launch flags,
//! described by an [`EnvironmentDescriptor`] and judged against a [`FramePolicy`].
use std::fmt;

use tasklabels_model::{EnvironmentDescriptor, FramePolicy};
use tracing::debug;

/// Reason the host runtime cannot propagate labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// Runtime launched with the flag that turns the capability off.
    ExplicitlyDisabled { flag: String },
    /// Capability exists only behind a flag that was not passed.
    RequiresExperimentalFlag {
        major: u32,
        flag: String,
        default_since: u32,
    },
    /// Runtime predates any support.
    UnsupportedVersion { major: u32, experimental_since: u32 },
}

impl Unavailable {
    /// Stable label for metrics and structured logs.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            Unavailable::ExplicitlyDisabled { .. } => "explicitly_disabled",
            Unavailable::RequiresExperimentalFlag { .. } => "requires_experimental_flag",
            Unavailable::UnsupportedVersion { .. } => "unsupported_version",
        }
    }
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::ExplicitlyDisabled { flag } => {
                write!(f, "explicitly disabled: runtime launched with {flag}")
            }
            Unavailable::RequiresExperimentalFlag {
                major,
                flag,
                default_since,
            } => write!(
                f,
                "requires experimental flag: runtime v{major} is older than v{default_since} and must be launched with {flag}"
            ),
            Unavailable::UnsupportedVersion {
                major,
                experimental_since,
            } => write!(
                f,
                "not supported on this version: runtime v{major} predates v{experimental_since}"
            ),
        }
    }
}

/// Feature gate verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(Unavailable),
}

impl Availability {
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// Decide whether async context frames are usable in `env`.
///
/// Rules are checked in order:
/// - the disable flag always wins;
/// - from `default_since` on the capability is on;
/// - in the experimental range it needs `enable_flag`;
/// - anything older is unsupported.
pub fn check_availability(env: &EnvironmentDescriptor, policy: &FramePolicy) -> Availability {
    let verdict = if env.has_flag(&policy.disable_flag) {
        Availability::Unavailable(Unavailable::ExplicitlyDisabled {
            flag: policy.disable_flag.clone(),
        })
    } else if env.major >= policy.default_since {
        Availability::Available
    } else if env.has_flag(&policy.enable_flag) && env.major >= policy.experimental_since {
        Availability::Available
    } else if env.major >= policy.experimental_since {
        Availability::Unavailable(Unavailable::RequiresExperimentalFlag {
            major: env.major,
            flag: policy.enable_flag.clone(),
            default_since: policy.default_since,
        })
    } else {
        Availability::Unavailable(Unavailable::UnsupportedVersion {
            major: env.major,
            experimental_since: policy.experimental_since,
        })
    };

    debug!(major = env.major, verdict = ?verdict, "async context frame availability checked");
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklabels_model::{DISABLE_FRAME_FLAG, EXPERIMENTAL_FRAME_FLAG};

    fn check(env: EnvironmentDescriptor) -> Availability {
        check_availability(&env, &FramePolicy::default())
    }

    #[test]
    fn default_enabled_versions_are_available() {
        assert_eq!(check(EnvironmentDescriptor::with_major(24)), Availability::Available);
        assert_eq!(check(EnvironmentDescriptor::with_major(30)), Availability::Available);
    }

    #[test]
    fn disable_flag_wins_over_version() {
        let env = EnvironmentDescriptor::with_major(25).with_flag(DISABLE_FRAME_FLAG);
        let verdict = check(env);

        assert!(matches!(
            verdict,
            Availability::Unavailable(Unavailable::ExplicitlyDisabled { .. })
        ));
    }

    #[test]
    fn disable_flag_wins_over_experimental_flag() {
        let env = EnvironmentDescriptor::with_major(22)
            .with_flag(EXPERIMENTAL_FRAME_FLAG)
            .with_flag(DISABLE_FRAME_FLAG);

        assert!(!check(env).is_available());
    }

    #[test]
    fn experimental_range_with_flag_is_available() {
        for major in [22, 23] {
            let env = EnvironmentDescriptor::with_major(major).with_flag(EXPERIMENTAL_FRAME_FLAG);
            assert!(check(env).is_available(), "v{major} with flag");
        }
    }

    #[test]
    fn experimental_range_without_flag_requires_it() {
        let verdict = check(EnvironmentDescriptor::with_major(23));
        let Availability::Unavailable(reason) = verdict else {
            panic!("expected unavailable");
        };

        assert_eq!(reason.as_label(), "requires_experimental_flag");
        let msg = reason.to_string();
        assert!(msg.contains("requires experimental flag"), "{msg}");
        assert!(msg.contains(EXPERIMENTAL_FRAME_FLAG), "{msg}");
    }

    #[test]
    fn old_versions_are_unsupported_even_with_flag() {
        let env = EnvironmentDescriptor::with_major(20).with_flag(EXPERIMENTAL_FRAME_FLAG);
        let Availability::Unavailable(reason) = check(env) else {
            panic!("expected unavailable");
        };

        assert!(matches!(reason, Unavailable::UnsupportedVersion { major: 20, .. }));
        assert!(reason.to_string().contains("not supported on this version"));
    }

    #[test]
    fn explicit_disable_message_names_flag() {
        let env = EnvironmentDescriptor::with_major(24).with_flag(DISABLE_FRAME_FLAG);
        let Availability::Unavailable(reason) = check(env) else {
            panic!("expected unavailable");
        };

        let msg = reason.to_string();
        assert!(msg.starts_with("explicitly disabled"), "{msg}");
        assert!(msg.contains(DISABLE_FRAME_FLAG), "{msg}");
    }

    #[test]
    fn custom_policy_thresholds_apply() {
        let policy = FramePolicy {
            default_since: 5,
            experimental_since: 3,
            ..FramePolicy::default()
        };

        let env = EnvironmentDescriptor::with_major(5);
        assert!(check_availability(&env, &policy).is_available());

        let env = EnvironmentDescriptor::with_major(2);
        assert!(matches!(
            check_availability(&env, &policy),
            Availability::Unavailable(Unavailable::UnsupportedVersion { .. })
        ));
    }
}

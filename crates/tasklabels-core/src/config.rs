use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tasklabels_model::{EnvironmentDescriptor, FramePolicy};

use crate::error::{LabelsError, LabelsResult};

/// Environment variable holding the host runtime version (e.g. `22.11.0`).
pub const ENV_RUNTIME_VERSION: &str = "TASKLABELS_RUNTIME_VERSION";
/// Environment variable holding whitespace separated runtime launch flags.
pub const ENV_RUNTIME_FLAGS: &str = "TASKLABELS_RUNTIME_FLAGS";
/// Environment variable selecting the propagation mode (`auto|enabled|disabled`).
pub const ENV_PROPAGATION: &str = "TASKLABELS_PROPAGATION";

/// Whether label propagation is attempted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationMode {
    /// Decided by the platform probe.
    #[default]
    Auto,
    /// Always propagate; the feature gate still applies.
    Enabled,
    /// Never propagate; every call is a passthrough.
    Disabled,
}

impl FromStr for PropagationMode {
    type Err = LabelsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "enabled" | "on" => Ok(Self::Enabled),
            "disabled" | "off" => Ok(Self::Disabled),
            _ => Err(LabelsError::InvalidConfig(format!(
                "unknown propagation mode {s:?} (expected: auto|enabled|disabled)"
            ))),
        }
    }
}

impl fmt::Display for PropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PropagationMode::Auto => "auto",
            PropagationMode::Enabled => "enabled",
            PropagationMode::Disabled => "disabled",
        })
    }
}

impl Serialize for PropagationMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PropagationMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Label propagation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Host runtime version. Unset means a runtime with frames on by default.
    pub runtime_version: Option<String>,
    /// Launch flags of the host runtime.
    pub flags: Vec<String>,
    /// Gate thresholds.
    pub policy: FramePolicy,
    /// Propagation mode.
    pub propagation: PropagationMode,
}

impl LabelsConfig {
    /// Build a config from `TASKLABELS_*` environment variables.
    ///
    /// Missing variables keep their defaults.
    pub fn from_env() -> LabelsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LabelsConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> LabelsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(version) = lookup(ENV_RUNTIME_VERSION).filter(|v| !v.trim().is_empty()) {
            cfg.runtime_version = Some(version);
        }
        if let Some(flags) = lookup(ENV_RUNTIME_FLAGS) {
            cfg.flags = flags.split_whitespace().map(str::to_string).collect();
        }
        if let Some(mode) = lookup(ENV_PROPAGATION) {
            cfg.propagation = mode.parse()?;
        }
        Ok(cfg)
    }

    /// Runtime description the feature gate is evaluated against.
    pub fn environment(&self) -> LabelsResult<EnvironmentDescriptor> {
        let env = match &self.runtime_version {
            Some(version) => EnvironmentDescriptor::new(version, self.flags.iter().cloned())
                .map_err(|e| LabelsError::InvalidConfig(e.to_string()))?,
            None => EnvironmentDescriptor {
                major: self.policy.default_since,
                flags: self.flags.clone(),
            },
        };
        Ok(env)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tasklabels_model::DEFAULT_ENABLED_SINCE;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = LabelsConfig::default();
        assert!(cfg.runtime_version.is_none());
        assert!(cfg.flags.is_empty());
        assert_eq!(cfg.propagation, PropagationMode::Auto);
    }

    #[test]
    fn unset_version_describes_default_enabled_runtime() {
        let env = LabelsConfig::default().environment().unwrap();
        assert_eq!(env.major, DEFAULT_ENABLED_SINCE);
    }

    #[test]
    fn reads_variables() {
        let cfg = LabelsConfig::from_lookup(lookup(&[
            (ENV_RUNTIME_VERSION, "22.3.0"),
            (
                ENV_RUNTIME_FLAGS,
                "--inspect  --experimental-async-context-frame",
            ),
            (ENV_PROPAGATION, "Disabled"),
        ]))
        .unwrap();

        assert_eq!(cfg.runtime_version.as_deref(), Some("22.3.0"));
        assert_eq!(cfg.flags.len(), 2);
        assert_eq!(cfg.propagation, PropagationMode::Disabled);

        let env = cfg.environment().unwrap();
        assert_eq!(env.major, 22);
        assert!(env.has_flag("--experimental-async-context-frame"));
    }

    #[test]
    fn blank_version_is_ignored() {
        let cfg = LabelsConfig::from_lookup(lookup(&[(ENV_RUNTIME_VERSION, "  ")])).unwrap();
        assert!(cfg.runtime_version.is_none());
    }

    #[test]
    fn bad_mode_is_rejected() {
        let err = LabelsConfig::from_lookup(lookup(&[(ENV_PROPAGATION, "sometimes")])).unwrap_err();
        assert!(matches!(err, LabelsError::InvalidConfig(_)));
    }

    #[test]
    fn bad_version_is_rejected() {
        let cfg = LabelsConfig {
            runtime_version: Some("latest".into()),
            ..Default::default()
        };
        assert!(matches!(cfg.environment(), Err(LabelsError::InvalidConfig(_))));
    }

    #[test]
    fn partial_deserialization() {
        let json = r#"{"runtime_version": "23.0.0", "propagation": "enabled"}"#;
        let cfg: LabelsConfig = serde_json::from_str(json).unwrap();

        assert_eq!(cfg.runtime_version.as_deref(), Some("23.0.0"));
        assert_eq!(cfg.propagation, PropagationMode::Enabled);
        assert_eq!(cfg.policy, FramePolicy::default());
    }
}

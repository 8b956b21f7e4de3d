use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Snapshot of the host runtime the labels are propagated in.
///
/// Feature gating is a pure function of this value, so tests can describe
/// any runtime without touching the real process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDescriptor {
    /// Major version of the host runtime.
    pub major: u32,
    /// Launch flags the runtime was started with.
    #[serde(default)]
    pub flags: Vec<String>,
}

impl EnvironmentDescriptor {
    /// Parse a version string (`"22.4.0"`, `"v24"`) and attach launch flags.
    pub fn new<I, S>(version: &str, flags: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut env: Self = version.parse()?;
        env.flags = flags.into_iter().map(Into::into).collect();
        Ok(env)
    }

    /// Descriptor for a known major version without flags.
    pub fn with_major(major: u32) -> Self {
        Self {
            major,
            flags: Vec::new(),
        }
    }

    /// Append a launch flag.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Returns `true` if the exact flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

impl FromStr for EnvironmentDescriptor {
    type Err = ModelError;

    /// Only the major component is kept.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let major = digits
            .split('.')
            .next()
            .filter(|m| !m.is_empty())
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(|| ModelError::InvalidVersion(s.to_string()))?;

        Ok(Self::with_major(major))
    }
}

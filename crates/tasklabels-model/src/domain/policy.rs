use serde::{Deserialize, Serialize};

use crate::domain::constants::{
    DEFAULT_ENABLED_SINCE, DISABLE_FRAME_FLAG, EXPERIMENTAL_FRAME_FLAG, EXPERIMENTAL_SINCE,
};

/// Version thresholds and launch flags that decide whether the host runtime
/// can carry context across suspension points.
///
/// Defaults describe a runtime where the capability ships behind a flag in
/// majors 22 and 23 and is on by default from 24.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramePolicy {
    /// First major version with the capability enabled by default.
    pub default_since: u32,
    /// First major version where the capability exists behind a flag.
    pub experimental_since: u32,
    /// Flag enabling the capability in the experimental range.
    pub enable_flag: String,
    /// Flag disabling the capability regardless of version.
    pub disable_flag: String,
}

impl Default for FramePolicy {
    fn default() -> Self {
        Self {
            default_since: DEFAULT_ENABLED_SINCE,
            experimental_since: EXPERIMENTAL_SINCE,
            enable_flag: EXPERIMENTAL_FRAME_FLAG.to_string(),
            disable_flag: DISABLE_FRAME_FLAG.to_string(),
        }
    }
}

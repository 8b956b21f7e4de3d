//! Well-known runtime thresholds and flag names.
//!
//! Kept in one place so the gate, the config layer and the tests agree on them.

/// Major version from which async context frames are on by default.
pub const DEFAULT_ENABLED_SINCE: u32 = 24;

/// Major version from which async context frames exist behind a flag.
pub const EXPERIMENTAL_SINCE: u32 = 22;

/// Launch flag enabling async context frames before they became the default.
pub const EXPERIMENTAL_FRAME_FLAG: &str = "--experimental-async-context-frame";

/// Launch flag turning async context frames off.
pub const DISABLE_FRAME_FLAG: &str = "--no-async-context-frame";

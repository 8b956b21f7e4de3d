use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::object::{LoggerFormat, LoggerLevel};

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Filter directives (e.g. `"info"`, `"tasklabels_core=debug,info"`).
    pub level: LoggerLevel,
    /// Include the event target (module path).
    pub with_targets: bool,
    /// Colorize text output when stdout is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Color is used only if enabled in config and stdout is a terminal.
    ///
    /// Checked at logger initialization, not at config parsing.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: LoggerConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level.as_str(), "info");
        assert!(cfg.with_targets);
        assert!(cfg.use_color);
    }

    #[test]
    fn partial_object_overrides_fields() {
        let json = r#"{"format": "json", "level": "tasklabels_core=trace,warn", "use_color": false}"#;
        let cfg: LoggerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level.as_str(), "tasklabels_core=trace,warn");
        assert!(!cfg.use_color);
        assert!(!cfg.should_use_color());
    }

    #[test]
    fn invalid_level_fails_deserialization() {
        let json = r#"{"level": "tasklabels_core=shouty"}"#;
        assert!(serde_json::from_str::<LoggerConfig>(json).is_err());
    }
}

//! Top-level diagram configuration
//!
//! Every section is optional in the TOML file:
//!
//! ```toml
//! save_delay_ms = 500
//!
//! [layout]
//! grid_columns = 3
//!
//! [export]
//! padding = 24.0
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::export::ExportConfig;
use crate::layout::LayoutConfig;
use crate::positions::DEFAULT_SAVE_DELAY;

/// Errors that can occur when loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Combined configuration for loading, laying out and exporting diagrams
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub layout: LayoutConfig,
    pub export: ExportConfig,
    /// Debounce delay of position saves, in milliseconds
    pub save_delay_ms: u64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            export: ExportConfig::default(),
            save_delay_ms: DEFAULT_SAVE_DELAY.as_millis() as u64,
        }
    }
}

impl DiagramConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the position save delay
    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DiagramConfig::from_str("").unwrap();
        assert_eq!(config, DiagramConfig::default());
        assert_eq!(config.save_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = DiagramConfig::from_str(
            r#"
save_delay_ms = 250

[layout]
grid_columns = 3

[export]
padding = 24.0
class_prefix = "x-"
"#,
        )
        .unwrap();

        assert_eq!(config.save_delay(), Duration::from_millis(250));
        assert_eq!(config.layout.grid_columns, 3);
        assert_eq!(config.layout.row_height, 110.0);
        assert_eq!(config.export.padding, 24.0);
        assert_eq!(config.export.class_prefix.as_deref(), Some("x-"));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let err = DiagramConfig::from_str("save_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

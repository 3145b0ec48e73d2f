//! Configuration for static SVG export

use serde::Deserialize;

use crate::layout::{Size, SEPARATOR_PREFIX};

/// Configuration options for the exported document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Padding added on every side of the content bounds
    pub padding: f64,

    /// Size assumed for nodes the renderer never measured
    pub default_node_size: (f64, f64),

    /// Nodes whose id starts with this prefix are left out of the export
    pub separator_prefix: String,

    /// Corner radius of node rectangles
    pub corner_radius: f64,

    /// Font size of node labels
    pub font_size: f64,

    /// Font size of the subtype caption under component labels
    pub caption_font_size: f64,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "av-" for "av-node")
    pub class_prefix: Option<String>,

    /// Suggested name of the downloaded file
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            default_node_size: (180.0, 60.0),
            separator_prefix: SEPARATOR_PREFIX.to_string(),
            corner_radius: 8.0,
            font_size: 14.0,
            caption_font_size: 10.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("av-".to_string()),
            file_name: "architecture-diagram.svg".to_string(),
        }
    }
}

impl ExportConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the padding around the content
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set the suggested file name
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub(crate) fn fallback_size(&self) -> Size {
        Size::new(self.default_node_size.0, self.default_node_size.1)
    }

    pub(crate) fn is_excluded(&self, id: &str) -> bool {
        !self.separator_prefix.is_empty() && id.starts_with(&self.separator_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.padding, 40.0);
        assert_eq!(config.default_node_size, (180.0, 60.0));
        assert!(config.is_excluded("separator-2"));
        assert!(!config.is_excluded("crm"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ExportConfig::new()
            .with_padding(10.0)
            .with_pretty_print(false)
            .without_class_prefix()
            .with_file_name("out.svg");

        assert_eq!(config.padding, 10.0);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, None);
        assert_eq!(config.file_name, "out.svg");
    }

    #[test]
    fn test_partial_toml() {
        let config: ExportConfig = toml::from_str("padding = 12.5").unwrap();
        assert_eq!(config.padding, 12.5);
        assert_eq!(config.separator_prefix, "separator-");
    }
}

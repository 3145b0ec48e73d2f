//! Stylesheet system for layer and status colors
//!
//! Nodes are filled by layer and stroked by lifecycle status. A stylesheet is
//! a small TOML document; any color it leaves out falls back to the default
//! ArchiMate-inspired palette.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{LayerCode, Status};

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping layers, statuses and named tokens to colors
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Layer code (`BIZ`, `APP`, ...) -> fill color
    pub layers: HashMap<String, String>,
    /// Status (`active`, ...) -> stroke color
    pub status: HashMap<String, String>,
    /// Other named colors: edges, text, headers, separators
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    layers: HashMap<String, String>,
    #[serde(default)]
    status: HashMap<String, String>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Layer table key used for codes the stylesheet does not list
const FALLBACK_LAYER: &str = "UNKNOWN";

/// Default palette, loosely following the ArchiMate layer colors
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "archimate"

[layers]
BIZ = "#ffffb5"
APP = "#b5ffff"
TECH = "#c9e7b7"
DATA = "#d9e2f3"
SEC = "#f8cecc"
UX = "#e1d5e7"
UNKNOWN = "#eeeeee"

[status]
active = "#2e7d32"
planned = "#1565c0"
deprecated = "#c62828"

[colors]
edge = "#555555"
text = "#1a1a1a"
caption = "#666666"
header-fill = "#f5f5f5"
header-stroke = "#999999"
separator = "#cccccc"
neutral = "#e0e0e0"
background = "#ffffff"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            layers: parsed.layers,
            status: parsed.status,
            colors: parsed.colors,
        })
    }

    /// Fill color of nodes in a layer; custom codes without an entry use `UNKNOWN`
    pub fn layer_fill(&self, code: &LayerCode) -> String {
        self.lookup(Table::Layers, code.as_str())
            .or_else(|| self.lookup(Table::Layers, FALLBACK_LAYER))
            .unwrap_or_else(|| "#eeeeee".to_string())
    }

    /// Stroke color of nodes with a lifecycle status
    pub fn status_stroke(&self, status: Status) -> String {
        self.lookup(Table::Status, status.as_str())
            .unwrap_or_else(|| "#333333".to_string())
    }

    /// Resolve a named color token with fallback to the default palette
    pub fn color(&self, token: &str) -> String {
        self.lookup(Table::Colors, token).unwrap_or_else(|| "#333333".to_string())
    }
}

#[derive(Clone, Copy)]
enum Table {
    Layers,
    Status,
    Colors,
}

impl Stylesheet {
    fn table(&self, table: Table) -> &HashMap<String, String> {
        match table {
            Table::Layers => &self.layers,
            Table::Status => &self.status,
            Table::Colors => &self.colors,
        }
    }

    /// Look a key up in this stylesheet, then in the default palette
    fn lookup(&self, table: Table, key: &str) -> Option<String> {
        if let Some(color) = self.table(table).get(key) {
            return Some(color.clone());
        }
        default_palette().table(table).get(key).cloned()
    }
}

fn default_palette() -> &'static Stylesheet {
    static PALETTE: OnceLock<Stylesheet> = OnceLock::new();
    PALETTE.get_or_init(|| {
        Stylesheet::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    })
}

impl Default for Stylesheet {
    fn default() -> Self {
        default_palette().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.name.as_deref(), Some("archimate"));
        assert_eq!(stylesheet.layer_fill(&LayerCode::Biz), "#ffffb5");
        assert_eq!(stylesheet.status_stroke(Status::Deprecated), "#c62828");
        assert_eq!(stylesheet.color("edge"), "#555555");
    }

    #[test]
    fn test_partial_stylesheet_falls_back() {
        let stylesheet = Stylesheet::from_str(
            r##"
[layers]
APP = "#0000ff"
"##,
        )
        .expect("Should parse");
        assert_eq!(stylesheet.layer_fill(&LayerCode::App), "#0000ff");
        assert_eq!(stylesheet.layer_fill(&LayerCode::Tech), "#c9e7b7");
        assert_eq!(
            stylesheet.layer_fill(&LayerCode::Other("MOTIVATION".to_string())),
            "#eeeeee"
        );
        assert_eq!(stylesheet.status_stroke(Status::Active), "#2e7d32");
    }

    #[test]
    fn test_unknown_token_defaults() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.color("no-such-token"), "#333333");
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Stylesheet::from_str("this is not valid toml {{{{");
        assert!(result.is_err());
    }
}

//! Architecture layers and the views that slice them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Short code identifying an architecture layer
///
/// Codes outside the known set are kept verbatim so that distinct custom
/// layers stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerCode {
    Biz,
    App,
    Tech,
    Data,
    Sec,
    Ux,
    Other(String),
}

impl LayerCode {
    /// Code given to components whose layer is missing from the catalog
    pub fn unassigned() -> Self {
        LayerCode::Other(String::new())
    }

    pub fn as_str(&self) -> &str {
        match self {
            LayerCode::Biz => "BIZ",
            LayerCode::App => "APP",
            LayerCode::Tech => "TECH",
            LayerCode::Data => "DATA",
            LayerCode::Sec => "SEC",
            LayerCode::Ux => "UX",
            LayerCode::Other(code) => code,
        }
    }
}

impl From<String> for LayerCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "BIZ" => LayerCode::Biz,
            "APP" => LayerCode::App,
            "TECH" => LayerCode::Tech,
            "DATA" => LayerCode::Data,
            "SEC" => LayerCode::Sec,
            "UX" => LayerCode::Ux,
            _ => LayerCode::Other(code),
        }
    }
}

impl From<LayerCode> for String {
    fn from(code: LayerCode) -> Self {
        match code {
            LayerCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LayerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered architecture layer
///
/// `order_num` defines the vertical stacking order of layer bands in the
/// metamodel diagram. Codes are unique within a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub code: LayerCode,
    pub name: String,
    #[serde(default)]
    pub order_num: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// The code and name of a component's layer, joined in by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRef {
    pub code: LayerCode,
    pub name: String,
}

impl From<&Layer> for LayerRef {
    fn from(layer: &Layer) -> Self {
        Self {
            code: layer.code.clone(),
            name: layer.name.clone(),
        }
    }
}

/// A named view of the flow diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    /// All layers together
    #[default]
    Integrated,
    Business,
    Application,
    Technology,
    Data,
    Security,
    Ux,
}

impl ViewType {
    pub const ALL: [ViewType; 7] = [
        ViewType::Integrated,
        ViewType::Business,
        ViewType::Application,
        ViewType::Technology,
        ViewType::Data,
        ViewType::Security,
        ViewType::Ux,
    ];

    /// The layer a view is restricted to, or `None` for the integrated view
    pub fn layer_code(&self) -> Option<LayerCode> {
        match self {
            ViewType::Integrated => None,
            ViewType::Business => Some(LayerCode::Biz),
            ViewType::Application => Some(LayerCode::App),
            ViewType::Technology => Some(LayerCode::Tech),
            ViewType::Data => Some(LayerCode::Data),
            ViewType::Security => Some(LayerCode::Sec),
            ViewType::Ux => Some(LayerCode::Ux),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Integrated => "integrated",
            ViewType::Business => "business",
            ViewType::Application => "application",
            ViewType::Technology => "technology",
            ViewType::Data => "data",
            ViewType::Security => "security",
            ViewType::Ux => "ux",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown view '{0}' (expected one of: integrated, business, application, technology, data, security, ux)")]
pub struct ParseViewError(String);

impl FromStr for ViewType {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ViewType::ALL
            .into_iter()
            .find(|view| view.as_str() == needle)
            .ok_or_else(|| ParseViewError(s.to_string()))
    }
}

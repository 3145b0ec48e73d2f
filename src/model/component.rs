//! Catalog components and their lifecycle

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layer::{LayerCode, LayerRef};

/// Lifecycle state of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Planned,
    Deprecated,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Planned => "planned",
            Status::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status predicate used by the graph filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn accepts(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown status '{0}' (expected one of: all, active, planned, deprecated)")]
pub struct ParseStatusError(String);

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Only(Status::Active)),
            "planned" => Ok(StatusFilter::Only(Status::Planned)),
            "deprecated" => Ok(StatusFilter::Only(Status::Deprecated)),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A catalog entry: business service, application, database, technology asset, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub layer_id: String,
    #[serde(default)]
    pub status: Status,
    /// Joined from `layer_id` when the catalog is loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<LayerRef>,
}

impl Component {
    /// Layer code of the joined layer, [`LayerCode::unassigned`] when missing
    pub fn layer_code(&self) -> LayerCode {
        self.layer
            .as_ref()
            .map(|l| l.code.clone())
            .unwrap_or_else(LayerCode::unassigned)
    }

    /// Derive the component's subtype from keywords in its name
    pub fn subtype(&self) -> ComponentSubtype {
        ComponentSubtype::infer(&self.name, self.layer_code())
    }
}

/// ArchiMate-flavoured element type, inferred rather than stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentSubtype {
    Actor,
    BusinessProcess,
    BusinessService,
    Application,
    Interface,
    DataObject,
    Database,
    Node,
    Server,
    NetworkDevice,
    SecurityDevice,
    Generic,
}

/// Keyword table, checked in order; the first matching row wins
const SUBTYPE_KEYWORDS: &[(&[&str], ComponentSubtype)] = &[
    (
        &["firewall", "waf", "ids", "ips", "vpn", "hsm", "siem"],
        ComponentSubtype::SecurityDevice,
    ),
    (
        &["router", "switch", "gateway", "balancer", "proxy", "network", "dns"],
        ComponentSubtype::NetworkDevice,
    ),
    (
        &["database", "db", "sql", "postgres", "mysql", "oracle", "mongo", "warehouse"],
        ComponentSubtype::Database,
    ),
    (
        &["server", "host", "vm", "cluster", "container", "kubernetes"],
        ComponentSubtype::Server,
    ),
    (&["api", "interface", "endpoint"], ComponentSubtype::Interface),
    (
        &["process", "workflow", "procedure"],
        ComponentSubtype::BusinessProcess,
    ),
    (
        &["actor", "customer", "user", "role", "team"],
        ComponentSubtype::Actor,
    ),
    (
        &["record", "entity", "document", "dataset"],
        ComponentSubtype::DataObject,
    ),
    (&["service"], ComponentSubtype::BusinessService),
    (
        &["app", "application", "portal", "system"],
        ComponentSubtype::Application,
    ),
];

impl ComponentSubtype {
    /// Infer a subtype from a display name, falling back on the layer
    pub fn infer(name: &str, layer: LayerCode) -> Self {
        let lowered = name.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        for (keywords, subtype) in SUBTYPE_KEYWORDS {
            if words
                .iter()
                .any(|w| keywords.iter().any(|k| w.starts_with(k)))
            {
                return *subtype;
            }
        }

        match layer {
            LayerCode::Biz => ComponentSubtype::BusinessService,
            LayerCode::App | LayerCode::Ux => ComponentSubtype::Application,
            LayerCode::Tech => ComponentSubtype::Node,
            LayerCode::Data => ComponentSubtype::DataObject,
            LayerCode::Sec => ComponentSubtype::SecurityDevice,
            LayerCode::Other(_) => ComponentSubtype::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentSubtype::Actor => "actor",
            ComponentSubtype::BusinessProcess => "process",
            ComponentSubtype::BusinessService => "service",
            ComponentSubtype::Application => "application",
            ComponentSubtype::Interface => "interface",
            ComponentSubtype::DataObject => "data object",
            ComponentSubtype::Database => "database",
            ComponentSubtype::Node => "node",
            ComponentSubtype::Server => "server",
            ComponentSubtype::NetworkDevice => "network device",
            ComponentSubtype::SecurityDevice => "security device",
            ComponentSubtype::Generic => "component",
        }
    }
}

impl fmt::Display for ComponentSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use serde::{Deserialize, Serialize};

/// Directed, typed edge between two components
///
/// Endpoints are not validated on load; edges whose endpoints are missing
/// from the rendered node set are dropped by the graph builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub source_component_id: String,
    pub target_component_id: String,
    pub relationship_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

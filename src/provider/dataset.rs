//! TOML catalog datasets
//!
//! ```toml
//! [[layers]]
//! id = "l-biz"
//! code = "BIZ"
//! name = "Business"
//! order_num = 0
//!
//! [[components]]
//! id = "c-billing"
//! name = "Billing Service"
//! layer_id = "l-biz"
//! status = "active"
//!
//! [[relationships]]
//! id = "r-1"
//! source_component_id = "c-billing"
//! target_component_id = "c-ledger"
//! relationship_type = "serves"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::model::{Component, Layer, Relationship};

/// Raw catalog records as stored, before layers are joined onto components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Dataset {
    /// Load a dataset from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse and validate a dataset from a TOML string
    pub fn from_str(content: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = toml::from_str(content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check the catalog invariants: unique layer codes, unique component ids
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut codes: HashMap<_, &str> = HashMap::new();
        for layer in &self.layers {
            if let Some(first) = codes.insert(&layer.code, &layer.id) {
                return Err(DatasetError::DuplicateLayerCode {
                    code: layer.code.clone(),
                    first: first.to_string(),
                    second: layer.id.clone(),
                });
            }
        }

        let mut ids = std::collections::HashSet::new();
        for component in &self.components {
            if !ids.insert(component.id.as_str()) {
                return Err(DatasetError::DuplicateComponent {
                    id: component.id.clone(),
                });
            }
        }

        Ok(())
    }
}

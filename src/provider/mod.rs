//! Catalog data providers
//!
//! A provider is the remote store holding layers, components and
//! relationships. [`load_catalog`] fetches all three and joins each
//! component's layer so downstream stages can read layer codes directly.

pub mod dataset;
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::DatasetError;
use crate::model::{Component, Layer, LayerRef, Relationship};

pub use dataset::Dataset;
pub use memory::InMemoryProvider;

/// Errors surfaced while fetching catalog data
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The store could not be reached or rejected the query
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

/// Source of catalog records
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch_layers(&self) -> Result<Vec<Layer>, ProviderError>;

    async fn fetch_components(&self) -> Result<Vec<Component>, ProviderError>;

    async fn fetch_relationships(&self) -> Result<Vec<Relationship>, ProviderError>;
}

/// A loaded catalog with layers joined onto components
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub layers: Vec<Layer>,
    pub components: Vec<Component>,
    pub relationships: Vec<Relationship>,
}

impl Catalog {
    /// Assemble a catalog, resolving each component's `layer` from `layer_id`
    pub fn from_parts(
        layers: Vec<Layer>,
        mut components: Vec<Component>,
        relationships: Vec<Relationship>,
    ) -> Self {
        let by_id: HashMap<&str, &Layer> = layers.iter().map(|l| (l.id.as_str(), l)).collect();

        for component in &mut components {
            component.layer = by_id.get(component.layer_id.as_str()).map(|l| LayerRef::from(*l));
            if component.layer.is_none() {
                log::debug!(
                    component = component.id.as_str(),
                    layer_id = component.layer_id.as_str();
                    "component references an unknown layer"
                );
            }
        }

        Self {
            layers,
            components,
            relationships,
        }
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }
}

impl From<Dataset> for Catalog {
    fn from(dataset: Dataset) -> Self {
        Catalog::from_parts(dataset.layers, dataset.components, dataset.relationships)
    }
}

/// Fetch layers, components and relationships concurrently
pub async fn load_catalog<P>(provider: &P) -> Result<Catalog, ProviderError>
where
    P: DataProvider + ?Sized,
{
    let (layers, components, relationships) = tokio::try_join!(
        provider.fetch_layers(),
        provider.fetch_components(),
        provider.fetch_relationships(),
    )?;

    log::debug!(
        layers = layers.len(),
        components = components.len(),
        relationships = relationships.len();
        "catalog loaded"
    );

    Ok(Catalog::from_parts(layers, components, relationships))
}

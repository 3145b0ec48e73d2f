//! In-memory catalog provider backed by a [`Dataset`]

use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::model::{Component, Layer, Relationship};

use super::{DataProvider, Dataset, ProviderError};

/// Serves a dataset from memory
///
/// The provider can be switched into an unavailable state, which makes every
/// fetch fail the way an unreachable remote store would.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    dataset: RwLock<Dataset>,
    unavailable: RwLock<Option<String>>,
}

impl InMemoryProvider {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
            unavailable: RwLock::new(None),
        }
    }

    /// Load the backing dataset from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        Ok(Self::new(Dataset::from_file(path)?))
    }

    /// Make subsequent fetches fail with `reason`, or recover with `None`
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.unavailable.write() = reason.map(str::to_string);
    }

    fn check_available(&self) -> Result<(), ProviderError> {
        match self.unavailable.read().as_ref() {
            Some(reason) => Err(ProviderError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataProvider for InMemoryProvider {
    async fn fetch_layers(&self) -> Result<Vec<Layer>, ProviderError> {
        self.check_available()?;
        Ok(self.dataset.read().layers.clone())
    }

    async fn fetch_components(&self) -> Result<Vec<Component>, ProviderError> {
        self.check_available()?;
        Ok(self.dataset.read().components.clone())
    }

    async fn fetch_relationships(&self) -> Result<Vec<Relationship>, ProviderError> {
        self.check_available()?;
        Ok(self.dataset.read().relationships.clone())
    }
}

//! In-memory position store

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::model::{NodePosition, PositionKey};

use super::{PositionStore, PositionStoreError};

/// Position store kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryPositionStore {
    positions: RwLock<HashMap<PositionKey, NodePosition>>,
    writes: AtomicUsize,
}

impl InMemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of upserts received so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Look up a single stored position
    pub fn get(&self, key: &PositionKey) -> Option<NodePosition> {
        self.positions.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.positions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.read().is_empty()
    }
}

#[async_trait]
impl PositionStore for InMemoryPositionStore {
    async fn load(
        &self,
        view_type: &str,
        user_id: &str,
    ) -> Result<Vec<NodePosition>, PositionStoreError> {
        let mut found: Vec<NodePosition> = self
            .positions
            .read()
            .values()
            .filter(|p| p.view_type == view_type && p.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.component_id.cmp(&b.component_id));
        Ok(found)
    }

    async fn upsert(&self, position: NodePosition) -> Result<(), PositionStoreError> {
        self.positions.write().insert(position.key(), position);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

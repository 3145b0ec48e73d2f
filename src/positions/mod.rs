//! Persisted node position overrides
//!
//! Positions are keyed by (component, view type, user). Writes are upserts
//! with last-writer-wins semantics; there is no versioning, so two users
//! editing the same key simply overwrite each other.

pub mod cache;
pub mod debounce;
pub mod file;
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::layout::Point;
use crate::model::NodePosition;

pub use cache::CachedPositionStore;
pub use debounce::{DebouncedPositionWriter, DEFAULT_SAVE_DELAY};
pub use file::JsonFilePositionStore;
pub use memory::InMemoryPositionStore;

/// Errors that can occur when reading or writing positions
#[derive(Debug, Error)]
pub enum PositionStoreError {
    #[error("failed to access position file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed position data: {0}")]
    Json(#[from] serde_json::Error),

    /// The store refused the write
    #[error("position store rejected the request: {0}")]
    Rejected(String),
}

/// Backend for stored node positions
#[async_trait]
pub trait PositionStore: Send + Sync + 'static {
    /// All positions of one user in one view
    async fn load(&self, view_type: &str, user_id: &str)
        -> Result<Vec<NodePosition>, PositionStoreError>;

    /// Insert or overwrite the position for its (component, view, user) key
    async fn upsert(&self, position: NodePosition) -> Result<(), PositionStoreError>;
}

/// Stored positions of one view, indexed by component id
#[derive(Debug, Clone, Default)]
pub struct PositionOverrides {
    positions: HashMap<String, Point>,
}

impl PositionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index loaded positions; a later entry for the same component wins
    pub fn from_positions(positions: impl IntoIterator<Item = NodePosition>) -> Self {
        let positions = positions
            .into_iter()
            .map(|p| (p.component_id, Point::new(p.x_position, p.y_position)))
            .collect();
        Self { positions }
    }

    /// Load the overrides of one user in one view
    pub async fn load<S>(store: &S, view_type: &str, user_id: &str) -> Result<Self, PositionStoreError>
    where
        S: PositionStore + ?Sized,
    {
        Ok(Self::from_positions(store.load(view_type, user_id).await?))
    }

    pub fn get_node_position(&self, component_id: &str) -> Option<Point> {
        self.positions.get(component_id).copied()
    }

    pub fn insert(&mut self, component_id: impl Into<String>, position: Point) {
        self.positions.insert(component_id.into(), position);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: &str, x: f64, y: f64) -> NodePosition {
        NodePosition {
            component_id: id.to_string(),
            view_type: "business".to_string(),
            user_id: "ana".to_string(),
            x_position: x,
            y_position: y,
        }
    }

    #[test]
    fn test_get_node_position() {
        let overrides = PositionOverrides::from_positions(vec![stored("a", 1.0, 2.0)]);
        assert_eq!(overrides.get_node_position("a"), Some(Point::new(1.0, 2.0)));
        assert_eq!(overrides.get_node_position("b"), None);
    }

    #[test]
    fn test_later_entry_wins() {
        let overrides =
            PositionOverrides::from_positions(vec![stored("a", 1.0, 2.0), stored("a", 3.0, 4.0)]);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get_node_position("a"), Some(Point::new(3.0, 4.0)));
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = InMemoryPositionStore::new();
        store.upsert(stored("a", 10.0, 20.0)).await.unwrap();
        let overrides = PositionOverrides::load(&store, "business", "ana").await.unwrap();
        assert_eq!(overrides.get_node_position("a"), Some(Point::new(10.0, 20.0)));

        let other_view = PositionOverrides::load(&store, "data", "ana").await.unwrap();
        assert!(other_view.is_empty());
    }
}

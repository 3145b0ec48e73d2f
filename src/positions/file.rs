//! Position store persisted to a JSON file

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::model::NodePosition;

use super::{PositionStore, PositionStoreError};

/// Stores positions as a JSON array in a single file
///
/// Every upsert rewrites the whole file. A missing file reads as empty.
#[derive(Debug)]
pub struct JsonFilePositionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFilePositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<NodePosition>, PositionStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(vec![]),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(vec![]),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PositionStore for JsonFilePositionStore {
    async fn load(
        &self,
        view_type: &str,
        user_id: &str,
    ) -> Result<Vec<NodePosition>, PositionStoreError> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(|p| p.view_type == view_type && p.user_id == user_id)
            .collect())
    }

    async fn upsert(&self, position: NodePosition) -> Result<(), PositionStoreError> {
        let _guard = self.lock.lock().await;
        let mut all = self.read_all().await?;
        let key = position.key();
        match all.iter_mut().find(|p| p.key() == key) {
            Some(existing) => *existing = position,
            None => all.push(position),
        }
        let json = serde_json::to_vec_pretty(&all)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn position(component: &str, x: f64) -> NodePosition {
        NodePosition {
            component_id: component.to_string(),
            view_type: "integrated".to_string(),
            user_id: "local".to_string(),
            x_position: x,
            y_position: 7.5,
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePositionStore::new(dir.path().join("positions.json"));
        assert!(store.load("integrated", "local").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions.json");
        let store = JsonFilePositionStore::new(&path);
        store.upsert(position("a", 1.0)).await.unwrap();
        store.upsert(position("b", 2.0)).await.unwrap();
        store.upsert(position("a", 3.0)).await.unwrap();

        let reopened = JsonFilePositionStore::new(&path);
        let loaded = reopened.load("integrated", "local").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].x_position, 3.0);
        assert_eq!(loaded[1].component_id, "b");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let store = JsonFilePositionStore::new(file.path());
        let err = store.load("integrated", "local").await.unwrap_err();
        assert!(matches!(err, PositionStoreError::Json(_)));
    }
}

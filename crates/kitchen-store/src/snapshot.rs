//! # Snapshot Persistence
//!
//! Durability by whole-store snapshot: the entire [`EntityStore`]
//! serializes to one pretty-printed JSON document and loads back
//! atomically. Entities reference each other by string id only, so a
//! snapshot needs no relational integrity beyond what the operations
//! layer already enforced when the data was written.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  startup                 runtime                shutdown/cron   │
//! │  ───────                 ───────                ─────────────   │
//! │  load(path) ──► Ops::new(store)                                 │
//! │                  mutations...                                   │
//! │                                 ops.export() ──► save(path)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any storage engine satisfying load/save of the full store can replace
//! this module without touching the operations layer.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

/// Snapshot store over a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonSnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and deserializes the snapshot file.
    pub async fn load(&self) -> StoreResult<EntityStore> {
        let bytes = fs::read(&self.path).await.map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let store: EntityStore = serde_json::from_slice(&bytes)?;
        info!(
            path = %self.path.display(),
            products = store.products.len(),
            inventory = store.inventory.len(),
            "snapshot loaded"
        );
        Ok(store)
    }

    /// Serializes and writes the full store, replacing any previous
    /// snapshot. Parent directories are created as needed.
    pub async fn save(&self, store: &EntityStore) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        let json = serde_json::to_vec_pretty(store)?;
        fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = std::env::temp_dir().join(format!("kitchenhub-snap-{}", uuid::Uuid::new_v4()));
        let snapshot = JsonSnapshotStore::new(dir.join("store.json"));

        let store = fixtures::seed_store();
        snapshot.save(&store).await.unwrap();
        let loaded = snapshot.load().await.unwrap();

        assert_eq!(loaded.products.len(), store.products.len());
        assert_eq!(loaded.inventory.len(), store.inventory.len());
        assert_eq!(loaded.branches.len(), store.branches.len());
        // Ids and derived statuses survive unchanged.
        for (a, b) in loaded.inventory.iter().zip(&store.inventory) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.status, b.status);
        }

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let snapshot = JsonSnapshotStore::new("/nonexistent/kitchenhub/store.json");
        let err = snapshot.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}

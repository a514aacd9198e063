//! Persistent state store using sled database

use async_trait::async_trait;
use sled::{Db, Tree};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use vellum_core::{StateReader, StateWriter, VellumError, VellumResult};

const STATE_TREE: &str = "state";

/// Persistent state store backed by sled database
///
/// Mutations are flushed to disk before returning, so a completed
/// put or delete survives process exit.
pub struct PersistentStateStore {
    db: Db,
    state: Tree,
}

impl PersistentStateStore {
    pub fn open<P: AsRef<Path>>(path: P) -> VellumResult<Self> {
        let db = sled::open(&path).map_err(|e| VellumError::StorageError(e.to_string()))?;
        let state = db
            .open_tree(STATE_TREE)
            .map_err(|e| VellumError::StorageError(e.to_string()))?;

        debug!("Opened persistent state store at {}", path.as_ref().display());

        Ok(Self { db, state })
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    fn flush(&self) -> VellumResult<()> {
        self.db
            .flush()
            .map_err(|e| VellumError::StorageError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl StateReader for PersistentStateStore {
    async fn get_state(&self, key: &str) -> VellumResult<Option<Vec<u8>>> {
        self.state
            .get(key.as_bytes())
            .map(|opt| opt.map(|v| v.to_vec()))
            .map_err(|e| VellumError::StorageError(e.to_string()))
    }
}

#[async_trait]
impl StateWriter for PersistentStateStore {
    async fn put_state(&self, key: &str, value: &[u8]) -> VellumResult<()> {
        self.state
            .insert(key.as_bytes(), value)
            .map_err(|e| VellumError::StorageError(e.to_string()))?;
        self.flush()
    }

    async fn delete_state(&self, key: &str) -> VellumResult<()> {
        self.state
            .remove(key.as_bytes())
            .map_err(|e| VellumError::StorageError(e.to_string()))?;
        self.flush()
    }
}

/// Thread-safe persistent store wrapper
pub type SharedPersistentStateStore = Arc<PersistentStateStore>;

/// Create a shared persistent state store
pub fn create_persistent_store<P: AsRef<Path>>(
    path: P,
) -> VellumResult<SharedPersistentStateStore> {
    Ok(Arc::new(PersistentStateStore::open(path)?))
}

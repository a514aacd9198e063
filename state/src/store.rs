//! Shared store handle, config-driven factory, and seeding helpers

use std::sync::Arc;
use vellum_core::{StateWriter, StorageBackend, StorageConfig, VellumResult};

use crate::memory::MemoryStateStore;
use crate::persistent::PersistentStateStore;

/// Shared handle to a state store implementation
pub type SharedStateStore = Arc<dyn StateWriter>;

/// A single key-value entry, used when seeding stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl StateEntry {
    pub fn new(key: &str, value: &[u8]) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_vec(),
        }
    }
}

/// Open a state store per configuration
pub fn open_store(config: &StorageConfig) -> VellumResult<SharedStateStore> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStateStore::new())),
        StorageBackend::Persistent => Ok(Arc::new(PersistentStateStore::open(&config.path)?)),
    }
}

/// Write initial entries into a store
pub async fn seed(store: &dyn StateWriter, entries: Vec<StateEntry>) -> VellumResult<()> {
    for entry in entries {
        store.put_state(&entry.key, &entry.value).await?;
    }
    Ok(())
}

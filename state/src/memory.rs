//! In-memory state store for testing and dev mode

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use vellum_core::{StateReader, StateWriter, VellumResult};

/// In-memory state store
pub struct MemoryStateStore {
    data: DashMap<String, Vec<u8>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    pub fn with_entries(entries: Vec<(String, Vec<u8>)>) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.data.insert(key, value);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateReader for MemoryStateStore {
    async fn get_state(&self, key: &str) -> VellumResult<Option<Vec<u8>>> {
        Ok(self.data.get(key).map(|v| v.value().clone()))
    }
}

#[async_trait]
impl StateWriter for MemoryStateStore {
    async fn put_state(&self, key: &str, value: &[u8]) -> VellumResult<()> {
        self.data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> VellumResult<()> {
        self.data.remove(key);
        Ok(())
    }
}

/// Thread-safe memory store wrapper
pub type SharedMemoryStateStore = Arc<MemoryStateStore>;

/// Create a shared memory state store
pub fn create_memory_store() -> SharedMemoryStateStore {
    Arc::new(MemoryStateStore::new())
}

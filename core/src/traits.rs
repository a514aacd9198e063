//! Core traits defining the VELLUM state store interface
//!
//! Contracts never talk to a store implementation directly; they see only
//! these traits, passed in through the transaction context.

use crate::error::VellumResult;
use async_trait::async_trait;

/// Read-only access to a key-value state store
#[async_trait]
pub trait StateReader: Send + Sync {
    /// Get the value stored at a key, or `None` if the key is unset
    async fn get_state(&self, key: &str) -> VellumResult<Option<Vec<u8>>>;
}

/// Mutating access to a key-value state store
#[async_trait]
pub trait StateWriter: StateReader {
    /// Set the value stored at a key
    async fn put_state(&self, key: &str, value: &[u8]) -> VellumResult<()>;

    /// Remove the entry at a key
    async fn delete_state(&self, key: &str) -> VellumResult<()>;
}

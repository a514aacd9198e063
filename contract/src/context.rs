//! Transaction execution context
//!
//! The invocation environment constructs one context per operation
//! invocation and passes it to the handler explicitly; contracts hold
//! no state of their own between invocations.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vellum_core::{StateWriter, Timestamp, TxId, VellumResult};

/// Identity of the client driving an invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientIdentity {
    pub msp_id: String,
    pub enrollment_id: String,
}

impl ClientIdentity {
    pub fn new(msp_id: &str, enrollment_id: &str) -> Self {
        Self {
            msp_id: msp_id.to_string(),
            enrollment_id: enrollment_id.to_string(),
        }
    }

    /// Identity used by dev tooling and tests
    pub fn dev() -> Self {
        Self::new("DevMSP", "dev")
    }
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self::dev()
    }
}

/// Execution context handed to every contract operation
///
/// Carries the state store handle, the client identity, and the
/// transaction id and timestamp assigned to the invocation.
#[derive(Clone)]
pub struct TransactionContext {
    store: Arc<dyn StateWriter>,
    identity: ClientIdentity,
    tx_id: TxId,
    timestamp: Timestamp,
}

impl TransactionContext {
    pub fn new(store: Arc<dyn StateWriter>) -> Self {
        Self::with_identity(store, ClientIdentity::dev())
    }

    pub fn with_identity(store: Arc<dyn StateWriter>, identity: ClientIdentity) -> Self {
        Self {
            store,
            identity,
            tx_id: TxId::new(),
            timestamp: Timestamp::now(),
        }
    }

    pub fn tx_id(&self) -> TxId {
        self.tx_id
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Read the raw bytes stored at a key
    pub async fn get_state(&self, key: &str) -> VellumResult<Option<Vec<u8>>> {
        self.store.get_state(key).await
    }

    /// Write raw bytes at a key
    pub async fn put_state(&self, key: &str, value: &[u8]) -> VellumResult<()> {
        self.store.put_state(key, value).await
    }

    /// Remove the entry at a key
    pub async fn delete_state(&self, key: &str) -> VellumResult<()> {
        self.store.delete_state(key).await
    }
}

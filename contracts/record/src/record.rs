//! The record value type persisted per key

use serde::{Deserialize, Serialize};
use vellum_core::{VellumError, VellumResult};

/// Single-field value stored for each record id
///
/// The id itself is the state-store key and is never part of the
/// serialized value. The stored layout is the compact JSON object
/// `{"value":<string>}`, kept byte-for-byte stable so ledgers written
/// by other runtimes stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Record {
    pub value: String,
}

impl Record {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Serialize to the stored JSON layout
    pub fn to_bytes(&self) -> VellumResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| VellumError::SerializationError(e.to_string()))
    }

    /// Deserialize from stored bytes
    pub fn from_bytes(bytes: &[u8]) -> VellumResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| VellumError::DeserializationError(e.to_string()))
    }
}

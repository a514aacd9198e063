//! Error types for VELLUM

use thiserror::Error;

/// Result type for VELLUM operations
pub type VellumResult<T> = Result<T, VellumError>;

/// Main error type for VELLUM
#[derive(Error, Debug)]
pub enum VellumError {
    // ============ Record Errors ============
    #[error("The {label} {id} already exists")]
    DuplicateKey { label: String, id: String },

    #[error("The {label} {id} does not exist")]
    NotFound { label: String, id: String },

    // ============ Registry Errors ============
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Operation already registered: {0}")]
    DuplicateOperation(String),

    #[error("Invalid arguments for {operation}: expected {expected}, got {got}")]
    InvalidArguments {
        operation: String,
        expected: usize,
        got: usize,
    },

    // ============ State Errors ============
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization failed: {0}")]
    SerializationError(String),

    #[error("Deserialization failed: {0}")]
    DeserializationError(String),

    // ============ Configuration Errors ============
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ============ General Errors ============
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for VellumError {
    fn from(err: std::io::Error) -> Self {
        VellumError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for VellumError {
    fn from(err: serde_json::Error) -> Self {
        VellumError::SerializationError(err.to_string())
    }
}

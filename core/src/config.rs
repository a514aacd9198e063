//! Configuration types for VELLUM

use crate::error::{VellumError, VellumResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Runtime name for logging
    pub name: String,

    /// Data directory
    pub data_dir: PathBuf,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Logging level
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: "vellum-dev".to_string(),
            data_dir: PathBuf::from("./data"),
            storage: StorageConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load from JSON
    pub fn from_json(json: &str) -> VellumResult<Self> {
        serde_json::from_str(json).map_err(|e| VellumError::ConfigError(e.to_string()))
    }

    /// Save to JSON
    pub fn to_json(&self) -> VellumResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VellumError::SerializationError(e.to_string()))
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which store implementation backs the runtime
    pub backend: StorageBackend,

    /// Directory for the persistent store
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Persistent,
            path: PathBuf::from("./data/state"),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Persistent,
}

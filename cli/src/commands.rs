//! CLI command plumbing

use std::path::{Path, PathBuf};
use std::sync::Arc;

use vellum_contract::{ContractRegistry, TransactionContext};
use vellum_core::{RuntimeConfig, StorageBackend, VellumError, VellumResult};
use vellum_record_contract::RecordContract;
use vellum_state::open_store;

/// Dev-mode invocation environment
///
/// Owns a registry with the record contract installed and a transaction
/// context over the configured store. Each CLI run dispatches a single
/// operation through it and exits.
pub struct Runtime {
    registry: ContractRegistry,
    ctx: TransactionContext,
}

impl Runtime {
    /// Open the configured store and install the record contract
    pub fn open(config: &RuntimeConfig) -> VellumResult<Self> {
        let store = open_store(&config.storage)?;

        let mut registry = ContractRegistry::new();
        registry.install(Arc::new(RecordContract::new()))?;

        Ok(Self {
            registry,
            ctx: TransactionContext::new(store),
        })
    }

    /// Dispatch one operation by wire name
    pub async fn invoke(
        &self,
        operation: &str,
        args: &[String],
    ) -> VellumResult<Option<Vec<u8>>> {
        self.registry.dispatch(&self.ctx, operation, args).await
    }

    /// Registry metadata document
    pub fn metadata(&self) -> serde_json::Value {
        self.registry.metadata()
    }
}

/// Resolve the effective runtime configuration
///
/// Starts from the config file when one is given (defaults otherwise),
/// then applies the flag overrides.
pub fn load_config(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
    memory: bool,
) -> VellumResult<RuntimeConfig> {
    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| VellumError::ConfigError(format!("{}: {}", path.display(), e)))?;
            RuntimeConfig::from_json(&content)?
        }
        None => RuntimeConfig::default(),
    };

    if let Some(dir) = data_dir {
        config.storage.path = dir.join("state");
        config.data_dir = dir;
    }

    if memory {
        config.storage.backend = StorageBackend::Memory;
    }

    Ok(config)
}

/// Print a dispatch response as JSON on stdout
///
/// Responses are JSON bytes by construction; mutating operations carry
/// no payload and print nothing.
pub fn print_response(response: Option<Vec<u8>>) {
    if let Some(bytes) = response {
        println!("{}", String::from_utf8_lossy(&bytes));
    }
}

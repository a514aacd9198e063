//! The record store contract
//!
//! Five operations over single-field records keyed by externally
//! supplied ids. Each operation takes the transaction context
//! explicitly and performs one existence check followed by at most one
//! state mutation; ordering across concurrent invocations is left
//! entirely to the backing store.

use std::sync::Arc;
use tracing::debug;
use vellum_contract::{Contract, OperationSpec, ParamSpec, TransactionContext};
use vellum_core::{VellumError, VellumResult};

use crate::record::Record;

/// Contract name exposed to the invocation environment
pub const CONTRACT_NAME: &str = "MyFirstContractContract";

// Wire operation names, preserved for client compatibility
pub const EXISTS_OPERATION: &str = "myFirstContractExists";
pub const CREATE_OPERATION: &str = "createMyFirstContract";
pub const READ_OPERATION: &str = "readMyFirstContract";
pub const UPDATE_OPERATION: &str = "updateMyFirstContract";
pub const DELETE_OPERATION: &str = "deleteMyFirstContract";

// Parameter names as published in the operation descriptors
const PARAM_ID: &str = "myFirstContractId";
const PARAM_VALUE: &str = "value";
const PARAM_NEW_VALUE: &str = "newValue";

/// Label naming the record type in error messages
const RECORD_LABEL: &str = "my first contract";

fn duplicate_key(id: &str) -> VellumError {
    VellumError::DuplicateKey {
        label: RECORD_LABEL.to_string(),
        id: id.to_string(),
    }
}

fn not_found(id: &str) -> VellumError {
    VellumError::NotFound {
        label: RECORD_LABEL.to_string(),
        id: id.to_string(),
    }
}

/// The record store contract
///
/// A pure orchestration layer: it owns no state of its own and issues
/// point get/put/delete calls against the store in the context.
#[derive(Debug, Default)]
pub struct RecordContract;

impl RecordContract {
    pub fn new() -> Self {
        Self
    }

    /// Check whether a record exists at an id
    ///
    /// A record exists iff the store holds a non-empty byte sequence at
    /// the id; an empty stored value counts as absent.
    pub async fn exists(&self, ctx: &TransactionContext, id: &str) -> VellumResult<bool> {
        let data = ctx.get_state(id).await?;
        Ok(matches!(data, Some(bytes) if !bytes.is_empty()))
    }

    /// Create a record; fails if the id is already taken
    pub async fn create(
        &self,
        ctx: &TransactionContext,
        id: &str,
        value: &str,
    ) -> VellumResult<()> {
        if self.exists(ctx, id).await? {
            return Err(duplicate_key(id));
        }

        let record = Record::new(value);
        ctx.put_state(id, &record.to_bytes()?).await?;

        debug!("Created record {}", id);
        Ok(())
    }

    /// Read the record stored at an id
    ///
    /// Malformed stored bytes propagate a deserialization failure.
    pub async fn read(&self, ctx: &TransactionContext, id: &str) -> VellumResult<Record> {
        if !self.exists(ctx, id).await? {
            return Err(not_found(id));
        }

        let data = ctx.get_state(id).await?.unwrap_or_default();
        Record::from_bytes(&data)
    }

    /// Replace the record stored at an id
    ///
    /// The update is a full replace: the stored record is rebuilt from
    /// the new value alone.
    pub async fn update(
        &self,
        ctx: &TransactionContext,
        id: &str,
        new_value: &str,
    ) -> VellumResult<()> {
        if !self.exists(ctx, id).await? {
            return Err(not_found(id));
        }

        let record = Record::new(new_value);
        ctx.put_state(id, &record.to_bytes()?).await?;

        debug!("Updated record {}", id);
        Ok(())
    }

    /// Delete the record stored at an id
    pub async fn delete(&self, ctx: &TransactionContext, id: &str) -> VellumResult<()> {
        if !self.exists(ctx, id).await? {
            return Err(not_found(id));
        }

        ctx.delete_state(id).await?;

        debug!("Deleted record {}", id);
        Ok(())
    }
}

impl Contract for RecordContract {
    fn name(&self) -> &str {
        CONTRACT_NAME
    }

    fn operations(self: Arc<Self>) -> Vec<OperationSpec> {
        let exists = {
            let contract = self.clone();
            OperationSpec::query(
                EXISTS_OPERATION,
                CONTRACT_NAME,
                vec![ParamSpec::new(PARAM_ID, "string")],
                "boolean",
                Box::new(move |ctx, args| {
                    let contract = contract.clone();
                    Box::pin(async move {
                        let found = contract.exists(&ctx, &args[0]).await?;
                        Ok(Some(serde_json::to_vec(&found)?))
                    })
                }),
            )
        };

        let create = {
            let contract = self.clone();
            OperationSpec::transaction(
                CREATE_OPERATION,
                CONTRACT_NAME,
                vec![
                    ParamSpec::new(PARAM_ID, "string"),
                    ParamSpec::new(PARAM_VALUE, "string"),
                ],
                Box::new(move |ctx, args| {
                    let contract = contract.clone();
                    Box::pin(async move {
                        contract.create(&ctx, &args[0], &args[1]).await?;
                        Ok(None)
                    })
                }),
            )
        };

        let read = {
            let contract = self.clone();
            OperationSpec::query(
                READ_OPERATION,
                CONTRACT_NAME,
                vec![ParamSpec::new(PARAM_ID, "string")],
                "Record",
                Box::new(move |ctx, args| {
                    let contract = contract.clone();
                    Box::pin(async move {
                        let record = contract.read(&ctx, &args[0]).await?;
                        Ok(Some(record.to_bytes()?))
                    })
                }),
            )
        };

        let update = {
            let contract = self.clone();
            OperationSpec::transaction(
                UPDATE_OPERATION,
                CONTRACT_NAME,
                vec![
                    ParamSpec::new(PARAM_ID, "string"),
                    ParamSpec::new(PARAM_NEW_VALUE, "string"),
                ],
                Box::new(move |ctx, args| {
                    let contract = contract.clone();
                    Box::pin(async move {
                        contract.update(&ctx, &args[0], &args[1]).await?;
                        Ok(None)
                    })
                }),
            )
        };

        let delete = {
            let contract = self.clone();
            OperationSpec::transaction(
                DELETE_OPERATION,
                CONTRACT_NAME,
                vec![ParamSpec::new(PARAM_ID, "string")],
                Box::new(move |ctx, args| {
                    let contract = contract.clone();
                    Box::pin(async move {
                        contract.delete(&ctx, &args[0]).await?;
                        Ok(None)
                    })
                }),
            )
        };

        vec![exists, create, read, update, delete]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_contract::ContractRegistry;
    use vellum_state::{create_memory_store, seed, StateEntry};

    const RECORD_1001: &[u8] = br#"{"value":"my first contract 1001 value"}"#;
    const RECORD_1002: &[u8] = br#"{"value":"my first contract 1002 value"}"#;

    async fn setup() -> (RecordContract, TransactionContext) {
        let store = create_memory_store();
        seed(
            store.as_ref(),
            vec![
                StateEntry::new("1001", RECORD_1001),
                StateEntry::new("1002", RECORD_1002),
            ],
        )
        .await
        .unwrap();

        (RecordContract::new(), TransactionContext::new(store))
    }

    async fn setup_registry() -> (ContractRegistry, TransactionContext) {
        let (_, ctx) = setup().await;
        let mut registry = ContractRegistry::new();
        registry.install(Arc::new(RecordContract::new())).unwrap();
        (registry, ctx)
    }

    #[tokio::test]
    async fn test_exists_for_seeded_record() {
        let (contract, ctx) = setup().await;
        assert!(contract.exists(&ctx, "1001").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_for_missing_record() {
        let (contract, ctx) = setup().await;
        assert!(!contract.exists(&ctx, "1003").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_for_empty_entry() {
        let (contract, ctx) = setup().await;

        // An entry holding zero bytes reads as absent
        ctx.put_state("1004", b"").await.unwrap();
        assert!(!contract.exists(&ctx, "1004").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_record() {
        let (contract, ctx) = setup().await;

        contract
            .create(&ctx, "1003", "my first contract 1003 value")
            .await
            .unwrap();

        assert_eq!(
            ctx.get_state("1003").await.unwrap(),
            Some(br#"{"value":"my first contract 1003 value"}"#.to_vec())
        );
    }

    #[tokio::test]
    async fn test_create_existing_record_fails() {
        let (contract, ctx) = setup().await;

        let result = contract.create(&ctx, "1001", "myvalue").await;

        let err = result.unwrap_err();
        assert!(matches!(err, VellumError::DuplicateKey { .. }));
        assert_eq!(err.to_string(), "The my first contract 1001 already exists");

        // The stored entry is untouched
        assert_eq!(
            ctx.get_state("1001").await.unwrap(),
            Some(RECORD_1001.to_vec())
        );
    }

    #[tokio::test]
    async fn test_read_record() {
        let (contract, ctx) = setup().await;

        let record = contract.read(&ctx, "1001").await.unwrap();
        assert_eq!(record, Record::new("my first contract 1001 value"));
    }

    #[tokio::test]
    async fn test_read_missing_record_fails() {
        let (contract, ctx) = setup().await;

        let err = contract.read(&ctx, "1003").await.unwrap_err();
        assert!(matches!(err, VellumError::NotFound { .. }));
        assert_eq!(err.to_string(), "The my first contract 1003 does not exist");
    }

    #[tokio::test]
    async fn test_read_malformed_record_fails() {
        let (contract, ctx) = setup().await;

        ctx.put_state("corrupt", b"not json").await.unwrap();

        let result = contract.read(&ctx, "corrupt").await;
        assert!(matches!(result, Err(VellumError::DeserializationError(_))));
    }

    #[tokio::test]
    async fn test_update_record() {
        let (contract, ctx) = setup().await;

        contract
            .update(&ctx, "1001", "my first contract 1001 new value")
            .await
            .unwrap();

        // Full replace: the stored bytes carry the new value only
        assert_eq!(
            ctx.get_state("1001").await.unwrap(),
            Some(br#"{"value":"my first contract 1001 new value"}"#.to_vec())
        );
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let (contract, ctx) = setup().await;

        let err = contract
            .update(&ctx, "1003", "my first contract 1003 new value")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "The my first contract 1003 does not exist");
        assert_eq!(ctx.get_state("1003").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let (contract, ctx) = setup().await;

        contract.delete(&ctx, "1001").await.unwrap();

        assert_eq!(ctx.get_state("1001").await.unwrap(), None);
        assert!(!contract.exists(&ctx, "1001").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_record_fails() {
        let (contract, ctx) = setup().await;

        let err = contract.delete(&ctx, "1003").await.unwrap_err();
        assert!(matches!(err, VellumError::NotFound { .. }));
        assert_eq!(err.to_string(), "The my first contract 1003 does not exist");
    }

    #[tokio::test]
    async fn test_dispatch_exists() {
        let (registry, ctx) = setup_registry().await;

        let response = registry
            .dispatch(&ctx, EXISTS_OPERATION, &["1001".to_string()])
            .await
            .unwrap();
        assert_eq!(response, Some(b"true".to_vec()));

        let response = registry
            .dispatch(&ctx, EXISTS_OPERATION, &["1003".to_string()])
            .await
            .unwrap();
        assert_eq!(response, Some(b"false".to_vec()));
    }

    #[tokio::test]
    async fn test_dispatch_read() {
        let (registry, ctx) = setup_registry().await;

        let response = registry
            .dispatch(&ctx, READ_OPERATION, &["1001".to_string()])
            .await
            .unwrap();
        assert_eq!(response, Some(RECORD_1001.to_vec()));
    }

    #[tokio::test]
    async fn test_dispatch_mutations() {
        let (registry, ctx) = setup_registry().await;

        let args = vec!["1003".to_string(), "my first contract 1003 value".to_string()];
        let response = registry.dispatch(&ctx, CREATE_OPERATION, &args).await.unwrap();
        assert_eq!(response, None);
        assert_eq!(
            ctx.get_state("1003").await.unwrap(),
            Some(br#"{"value":"my first contract 1003 value"}"#.to_vec())
        );

        let args = vec!["1003".to_string(), "replacement".to_string()];
        registry.dispatch(&ctx, UPDATE_OPERATION, &args).await.unwrap();
        assert_eq!(
            ctx.get_state("1003").await.unwrap(),
            Some(br#"{"value":"replacement"}"#.to_vec())
        );

        let args = vec!["1003".to_string()];
        registry.dispatch(&ctx, DELETE_OPERATION, &args).await.unwrap();
        assert_eq!(ctx.get_state("1003").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dispatch_wrong_arity() {
        let (registry, ctx) = setup_registry().await;

        let result = registry
            .dispatch(&ctx, CREATE_OPERATION, &["1003".to_string()])
            .await;

        assert!(matches!(
            result,
            Err(VellumError::InvalidArguments {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_dispatch_error_passes_through() {
        let (registry, ctx) = setup_registry().await;

        let args = vec!["1001".to_string(), "myvalue".to_string()];
        let err = registry
            .dispatch(&ctx, CREATE_OPERATION, &args)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "The my first contract 1001 already exists");
    }

    #[tokio::test]
    async fn test_operation_descriptors() {
        let (registry, _ctx) = setup_registry().await;

        assert_eq!(registry.len(), 5);

        let exists = registry.operation(EXISTS_OPERATION).unwrap();
        assert!(exists.read_only);
        assert_eq!(exists.returns.as_deref(), Some("boolean"));
        assert_eq!(exists.params, vec![ParamSpec::new("myFirstContractId", "string")]);

        let read = registry.operation(READ_OPERATION).unwrap();
        assert!(read.read_only);
        assert_eq!(read.returns.as_deref(), Some("Record"));

        for name in [CREATE_OPERATION, UPDATE_OPERATION, DELETE_OPERATION] {
            let spec = registry.operation(name).unwrap();
            assert!(!spec.read_only);
            assert_eq!(spec.returns, None);
            assert_eq!(spec.contract, CONTRACT_NAME);
        }

        let create = registry.operation(CREATE_OPERATION).unwrap();
        assert_eq!(create.params[1], ParamSpec::new("value", "string"));

        let update = registry.operation(UPDATE_OPERATION).unwrap();
        assert_eq!(update.params[1], ParamSpec::new("newValue", "string"));
    }
}

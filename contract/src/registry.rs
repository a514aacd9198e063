//! Operation registry
//!
//! The registration table mapping wire operation names to handlers and
//! descriptors. Built at initialization by installing contracts, then
//! exposed to the invocation environment for dispatch and introspection.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::json;
use tracing::debug;
use vellum_core::{VellumError, VellumResult};

use crate::context::TransactionContext;
use crate::Contract;

/// Future returned by an operation handler
pub type HandlerFuture = Pin<Box<dyn Future<Output = VellumResult<Option<Vec<u8>>>> + Send>>;

/// Boxed async handler from (context, arguments) to an optional response payload
pub type OperationHandler = Box<dyn Fn(TransactionContext, Vec<String>) -> HandlerFuture + Send + Sync>;

/// Argument descriptor for a registered operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub type_name: String,
}

impl ParamSpec {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

/// One row of the registration table
pub struct OperationSpec {
    /// Wire operation name
    pub name: String,
    /// Name of the owning contract
    pub contract: String,
    /// True if the operation never mutates state
    pub read_only: bool,
    /// Argument descriptors, in call order
    pub params: Vec<ParamSpec>,
    /// Return type descriptor, if the operation returns a payload
    pub returns: Option<String>,
    handler: OperationHandler,
}

impl OperationSpec {
    pub fn new(
        name: &str,
        contract: &str,
        read_only: bool,
        params: Vec<ParamSpec>,
        returns: Option<&str>,
        handler: OperationHandler,
    ) -> Self {
        Self {
            name: name.to_string(),
            contract: contract.to_string(),
            read_only,
            params,
            returns: returns.map(|r| r.to_string()),
            handler,
        }
    }

    /// A read-only operation returning a payload
    pub fn query(
        name: &str,
        contract: &str,
        params: Vec<ParamSpec>,
        returns: &str,
        handler: OperationHandler,
    ) -> Self {
        Self::new(name, contract, true, params, Some(returns), handler)
    }

    /// A state-mutating operation with no return payload
    pub fn transaction(
        name: &str,
        contract: &str,
        params: Vec<ParamSpec>,
        handler: OperationHandler,
    ) -> Self {
        Self::new(name, contract, false, params, None, handler)
    }
}

/// Registration table mapping wire operation names to specs
///
/// BTreeMap keeps iteration (and therefore metadata output)
/// deterministic.
pub struct ContractRegistry {
    operations: BTreeMap<String, OperationSpec>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self {
            operations: BTreeMap::new(),
        }
    }

    /// Register a single operation; duplicate names are refused
    pub fn register(&mut self, spec: OperationSpec) -> VellumResult<()> {
        if self.operations.contains_key(&spec.name) {
            return Err(VellumError::DuplicateOperation(spec.name.clone()));
        }

        debug!("Registered operation {} ({})", spec.name, spec.contract);
        self.operations.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// Install every operation of a contract
    pub fn install(&mut self, contract: Arc<dyn Contract>) -> VellumResult<()> {
        let name = contract.name().to_string();
        let specs = contract.operations();

        debug!("Installing contract {} ({} operations)", name, specs.len());

        for spec in specs {
            self.register(spec)?;
        }
        Ok(())
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.operations.contains_key(operation)
    }

    pub fn operation(&self, operation: &str) -> Option<&OperationSpec> {
        self.operations.get(operation)
    }

    /// Registered wire names, sorted
    pub fn operation_names(&self) -> Vec<String> {
        self.operations.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Dispatch an operation by wire name
    ///
    /// Resolves the name, checks the argument count against the
    /// descriptors, and awaits the handler.
    pub async fn dispatch(
        &self,
        ctx: &TransactionContext,
        operation: &str,
        args: &[String],
    ) -> VellumResult<Option<Vec<u8>>> {
        let spec = self
            .operations
            .get(operation)
            .ok_or_else(|| VellumError::UnknownOperation(operation.to_string()))?;

        if args.len() != spec.params.len() {
            return Err(VellumError::InvalidArguments {
                operation: operation.to_string(),
                expected: spec.params.len(),
                got: args.len(),
            });
        }

        debug!(
            "Dispatching {} (read_only={}, tx={})",
            spec.name,
            spec.read_only,
            ctx.tx_id()
        );

        (spec.handler)(ctx.clone(), args.to_vec()).await
    }

    /// Render the registration table as a JSON metadata document
    pub fn metadata(&self) -> serde_json::Value {
        let mut contracts: BTreeMap<String, Vec<serde_json::Value>> = BTreeMap::new();

        for spec in self.operations.values() {
            let params: Vec<serde_json::Value> = spec
                .params
                .iter()
                .map(|p| json!({ "name": p.name, "type": p.type_name }))
                .collect();

            contracts.entry(spec.contract.clone()).or_default().push(json!({
                "name": spec.name,
                "readOnly": spec.read_only,
                "parameters": params,
                "returns": spec.returns,
            }));
        }

        let contracts: Vec<serde_json::Value> = contracts
            .into_iter()
            .map(|(name, operations)| json!({ "name": name, "operations": operations }))
            .collect();

        json!({ "contracts": contracts })
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_state::create_memory_store;

    /// Minimal contract exercising both operation kinds
    struct PingContract;

    impl Contract for PingContract {
        fn name(&self) -> &str {
            "PingContract"
        }

        fn operations(self: Arc<Self>) -> Vec<OperationSpec> {
            vec![
                OperationSpec::query(
                    "ping",
                    "PingContract",
                    vec![],
                    "string",
                    Box::new(|_ctx, _args| Box::pin(async { Ok(Some(b"\"pong\"".to_vec())) })),
                ),
                OperationSpec::transaction(
                    "putEntry",
                    "PingContract",
                    vec![
                        ParamSpec::new("key", "string"),
                        ParamSpec::new("value", "string"),
                    ],
                    Box::new(|ctx, args| {
                        Box::pin(async move {
                            ctx.put_state(&args[0], args[1].as_bytes()).await?;
                            Ok(None)
                        })
                    }),
                ),
            ]
        }
    }

    fn setup() -> (ContractRegistry, TransactionContext) {
        let mut registry = ContractRegistry::new();
        registry.install(Arc::new(PingContract)).unwrap();
        let ctx = TransactionContext::new(create_memory_store());
        (registry, ctx)
    }

    #[tokio::test]
    async fn test_dispatch_query() {
        let (registry, ctx) = setup();

        let response = registry.dispatch(&ctx, "ping", &[]).await.unwrap();
        assert_eq!(response, Some(b"\"pong\"".to_vec()));
    }

    #[tokio::test]
    async fn test_dispatch_transaction_writes() {
        let (registry, ctx) = setup();

        let args = vec!["key1".to_string(), "value1".to_string()];
        let response = registry.dispatch(&ctx, "putEntry", &args).await.unwrap();

        assert_eq!(response, None);
        assert_eq!(
            ctx.get_state("key1").await.unwrap(),
            Some(b"value1".to_vec())
        );
    }

    #[tokio::test]
    async fn test_dispatch_unknown_operation() {
        let (registry, ctx) = setup();

        let result = registry.dispatch(&ctx, "missing", &[]).await;
        assert!(matches!(result, Err(VellumError::UnknownOperation(_))));
    }

    #[tokio::test]
    async fn test_dispatch_wrong_arity() {
        let (registry, ctx) = setup();

        let args = vec!["only-one".to_string()];
        let result = registry.dispatch(&ctx, "putEntry", &args).await;

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
    async fn test_install_twice_refused() {
        let (mut registry, _ctx) = setup();

        let result = registry.install(Arc::new(PingContract));
        assert!(matches!(result, Err(VellumError::DuplicateOperation(_))));
    }

    #[tokio::test]
    async fn test_metadata_document() {
        let (registry, _ctx) = setup();

        let metadata = registry.metadata();
        let contracts = metadata["contracts"].as_array().unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0]["name"], "PingContract");

        let operations = contracts[0]["operations"].as_array().unwrap();
        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0]["name"], "ping");
        assert_eq!(operations[0]["readOnly"], true);
        assert_eq!(operations[0]["returns"], "string");
        assert_eq!(operations[1]["name"], "putEntry");
        assert_eq!(operations[1]["readOnly"], false);
        assert_eq!(operations[1]["returns"], serde_json::Value::Null);
    }

    #[test]
    fn test_operation_names_sorted() {
        let mut registry = ContractRegistry::new();
        registry.install(Arc::new(PingContract)).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.operation_names(), vec!["ping", "putEntry"]);
        assert!(registry.contains("ping"));
        assert!(!registry.contains("pong"));
    }
}

//! VELLUM Contract Runtime
//!
//! The surface between contracts and the invocation environment: the
//! transaction context handed to every operation, the `Contract` trait
//! implemented by registrable contracts, and the operation registry
//! that dispatches wire names to handlers.

pub mod context;
pub mod registry;

pub use context::*;
pub use registry::*;

use std::sync::Arc;

/// A registrable unit of contract operations
pub trait Contract: Send + Sync {
    /// Contract name as exposed to the invocation environment
    fn name(&self) -> &str;

    /// Build the operation table for this contract
    fn operations(self: Arc<Self>) -> Vec<OperationSpec>;
}

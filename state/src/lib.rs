//! VELLUM State Stores
//!
//! Key-value state store implementations for the contract runtime.
//! Every store is addressed by opaque string keys holding byte-array values.

pub mod store;
pub mod memory;
pub mod persistent;

pub use store::*;
pub use memory::*;
pub use persistent::*;

//! Record Store Contract for VELLUM
//!
//! Implements point CRUD over single-field records:
//! - Existence checks against raw stored bytes
//! - Create with duplicate-key protection
//! - Read, full-replace update, and delete with existence preconditions

pub mod record;
pub mod contract;

pub use record::*;
pub use contract::*;

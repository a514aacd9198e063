//! VELLUM Core Library
//!
//! Core types, traits, and abstractions for the VELLUM contract runtime:
//! the state store interface, the workspace error type, and configuration.

pub mod types;
pub mod traits;
pub mod error;
pub mod config;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use config::*;

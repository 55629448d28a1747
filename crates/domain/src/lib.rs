//! # AC Config Domain
//!
//! Domain types and models for the Auth Connect configuration tool.
//!
//! This crate contains:
//! - Identity provider and flow catalogs (the registry)
//! - Provider connection options and the opaque `AuthResult`
//! - The Session Engine setup object (`EngineConfig`)
//! - Built-in provider presets and the default-selection policy
//! - Application configuration structures
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other AC Config crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod presets;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

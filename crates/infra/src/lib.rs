//! # AC Config Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - `ConfigStore` adapters (memory, JSON file, platform keychain)
//! - Platform detection
//! - Application config loading (environment, JSON/TOML files)
//! - Tracing subscriber setup
//! - The composition root that assembles an `AuthenticationService`
//!
//! ## Architecture
//! - Implements traits defined in `acconfig-core`
//! - Depends on `acconfig-domain` and `acconfig-core`
//! - Contains all "impure" code (I/O, platform APIs)

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod observability;
pub mod platform;
pub mod storage;

// Re-export commonly used items
pub use bootstrap::{build_authentication_service, build_platform, build_store};
pub use errors::InfraError;
pub use observability::init_tracing;
pub use platform::{detect_platform, StaticPlatform};
pub use storage::{FileConfigStore, KeychainConfigStore, MemoryConfigStore};

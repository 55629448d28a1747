//! # AC Config Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for storage, the Session Engine and
//!   platform detection
//! - The identity provider capability and its factory
//! - The configuration resolver
//! - The `AuthenticationService` orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `acconfig-domain`
//! - No storage, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod authentication;

// Re-export specific items to avoid ambiguity
pub use authentication::ports::{ConfigStore, PlatformProvider, SessionEngine};
pub use authentication::providers::{
    Auth0Provider, AzureProvider, CognitoProvider, IdentityProvider, OktaProvider,
    OneLoginProvider, ProviderFactory,
};
pub use authentication::resolver::ConfigResolver;
pub use authentication::service::{
    AuthenticationService, ServiceState, SessionSnapshot, SessionStatus,
};

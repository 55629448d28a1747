//! Authentication orchestration
//!
//! ```text
//! ┌───────────────────────┐
//! │ AuthenticationService │  Single-flight init + login/logout/refresh
//! └──────────┬────────────┘
//!            │
//!            ├──► ConfigResolver   (cached provider/options/flow)
//!            │         │
//!            │         └──► ConfigStore      (durable key-value port)
//!            │
//!            ├──► ProviderFactory  (closed registry → IdentityProvider)
//!            │
//!            └──► SessionEngine    (external OIDC client port)
//! ```

pub mod ports;
pub mod providers;
pub mod resolver;
pub mod service;

//! Common data types used throughout the application

pub mod auth_result;
pub mod engine;
pub mod flow;
pub mod options;
pub mod platform;
pub mod provider;

pub use auth_result::AuthResult;
pub use engine::{EngineConfig, IosOptions, IosWebView, LogLevel, UiMode, WebOptions};
pub use flow::{flows, Flow, FlowKind};
pub use options::ProviderOptions;
pub use platform::Platform;
pub use provider::{providers, Provider, ProviderKind};

//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; binaries and test harnesses
//! call [`init_tracing`] once to decide where they go.

use acconfig_domain::{AcConfigError, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber described by `config`
///
/// # Errors
/// `Config` for an invalid filter, `Internal` when a global subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.filter)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json().with_target(true).with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| AcConfigError::Internal(format!("tracing already initialized: {e}")))?;
    tracing::debug!(filter = %config.filter, json = config.json, "Tracing initialized");
    Ok(())
}

/// Parse `EnvFilter` directives
///
/// # Errors
/// Returns `AcConfigError::Config` for malformed directives.
pub fn build_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| AcConfigError::Config(format!("invalid log filter '{directives}': {e}")))
}

//! Session Engine setup object

use serde::{Deserialize, Serialize};

use super::flow::{Flow, FlowKind};
use super::platform::Platform;

/// Engine log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[default]
    Debug,
    Error,
    None,
}

/// iOS web view used for the login page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IosWebView {
    #[default]
    Private,
    Shared,
}

/// How the web login page is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    #[default]
    Popup,
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IosOptions {
    pub web_view: IosWebView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebOptions {
    pub ui_mode: UiMode,
    pub auth_flow: FlowKind,
}

/// Configuration passed to the engine's `setup`
///
/// Serializes to
/// `{ logLevel, platform, ios: { webView }, web: { uiMode, authFlow } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub log_level: LogLevel,
    pub platform: String,
    pub ios: IosOptions,
    pub web: WebOptions,
}

impl EngineConfig {
    /// Build the setup object for a platform and optional flow
    ///
    /// Without a flow the web auth flow falls back to implicit.
    #[must_use]
    pub fn for_platform(platform: Platform, flow: Option<&Flow>) -> Self {
        Self {
            log_level: LogLevel::Debug,
            platform: platform.engine_name().to_string(),
            ios: IosOptions { web_view: IosWebView::Private },
            web: WebOptions {
                ui_mode: UiMode::Popup,
                auth_flow: flow.map(|f| f.key).unwrap_or_default(),
            },
        }
    }
}

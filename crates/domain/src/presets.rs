//! Built-in provider presets and the default-selection policy
//!
//! Each preset is a demo tenant for one provider. On native platforms the
//! redirect/logout URIs point at the app's custom scheme and no flow is
//! selected (the engine default applies); on the web they point at the local
//! dev server and a provider-appropriate flow is selected.

use crate::errors::{AcConfigError, Result};
use crate::types::{Flow, FlowKind, Platform, Provider, ProviderKind, ProviderOptions};

/// Redirect and logout URI for native builds
pub const NATIVE_REDIRECT_URI: &str = "msauth://login";

/// Registered native redirect for the Azure demo tenant
pub const AZURE_NATIVE_REDIRECT_URI: &str =
    "msauth://com.ionic.acprovider/O5m5Gtd2Xt8UNkW3wk7DWyKGfv8%3D";

/// Redirect and logout URI for the web dev server
pub const WEB_REDIRECT_URI: &str = "http://localhost:8100/login";

/// Provider kind selected when nothing has been persisted
pub const DEFAULT_PROVIDER: ProviderKind = ProviderKind::Cognito;

/// A complete `(provider, options, flow)` selection
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPreset {
    pub provider: Provider,
    pub options: ProviderOptions,
    pub flow: Option<Flow>,
}

impl ProviderPreset {
    /// Split into the triple accepted by `set_config`
    #[must_use]
    pub fn into_parts(self) -> (Provider, ProviderOptions, Option<Flow>) {
        (self.provider, self.options, self.flow)
    }
}

/// Preset for a provider kind on the given platform
///
/// # Errors
/// Returns `AcConfigError::Config` for kinds without a built-in tenant.
pub fn preset(kind: ProviderKind, platform: Platform) -> Result<ProviderPreset> {
    let (options, web_flow) = match kind {
        ProviderKind::Auth0 => (auth0_options(), FlowKind::Implicit),
        ProviderKind::Azure => (azure_options(), FlowKind::Implicit),
        ProviderKind::Cognito => (cognito_options(), FlowKind::Pkce),
        ProviderKind::Okta => (okta_options(), FlowKind::Pkce),
        ProviderKind::OneLogin => {
            return Err(AcConfigError::Config(format!("no built-in preset for {kind}")));
        }
    };

    let (options, flow) = match platform {
        Platform::Native => {
            let redirect = if kind == ProviderKind::Azure {
                AZURE_NATIVE_REDIRECT_URI
            } else {
                NATIVE_REDIRECT_URI
            };
            (options.with_redirects(redirect, redirect), None)
        }
        Platform::Web => (
            options.with_redirects(WEB_REDIRECT_URI, WEB_REDIRECT_URI),
            Some(Flow::from_kind(web_flow)),
        ),
    };

    Ok(ProviderPreset { provider: Provider::from_kind(kind), options, flow })
}

/// Selection used on first launch, before anything was persisted
#[must_use]
pub fn default_selection(platform: Platform) -> ProviderPreset {
    let options = cognito_options();
    match platform {
        Platform::Native => ProviderPreset {
            provider: Provider::from_kind(DEFAULT_PROVIDER),
            options: options.with_redirects(NATIVE_REDIRECT_URI, NATIVE_REDIRECT_URI),
            flow: None,
        },
        Platform::Web => ProviderPreset {
            provider: Provider::from_kind(DEFAULT_PROVIDER),
            options: options.with_redirects(WEB_REDIRECT_URI, WEB_REDIRECT_URI),
            flow: Some(Flow::from_kind(FlowKind::Pkce)),
        },
    }
}

fn auth0_options() -> ProviderOptions {
    ProviderOptions::new(
        "yLasZNUGkZ19DGEjTmAITBfGXzqbvd00",
        "https://dev-2uspt-sz.us.auth0.com/.well-known/openid-configuration",
        "",
        "",
        "openid email picture profile offline_access",
        // Auth0 returns an empty JWT payload without an audience
        "https://io.ionic.demo.ac",
    )
}

fn azure_options() -> ProviderOptions {
    ProviderOptions::new(
        "ed8cb65d-7bb2-4107-bc36-557fb680b994",
        "https://dtjacdemo.b2clogin.com/dtjacdemo.onmicrosoft.com/v2.0/.well-known/openid-configuration?p=B2C_1_acdemo2",
        "",
        "",
        "openid offline_access email profile https://dtjacdemo.onmicrosoft.com/ed8cb65d-7bb2-4107-bc36-557fb680b994/demo.read",
        "",
    )
}

fn cognito_options() -> ProviderOptions {
    ProviderOptions::new(
        "64p9c53l5thd5dikra675suvq9",
        "https://cognito-idp.us-east-2.amazonaws.com/us-east-2_YU8VQe29z/.well-known/openid-configuration",
        "",
        "",
        "openid email profile offline_access",
        "",
    )
}

fn okta_options() -> ProviderOptions {
    ProviderOptions::new(
        "0oaur4c907I5uMr4I0h7",
        "https://dev-622807.oktapreview.com/.well-known/openid-configuration",
        "",
        "",
        "openid email profile offline_access",
        "",
    )
}

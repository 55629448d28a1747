//! Domain constants

/// Storage key holding the selected [`crate::Provider`]
pub const AUTH_PROVIDER_KEY: &str = "auth-provider";

/// Storage key holding the selected [`crate::ProviderOptions`]
pub const AUTH_PROVIDER_OPTIONS_KEY: &str = "auth-provider-options";

/// Storage key holding the selected [`crate::Flow`] (absent when unset)
pub const AUTH_FLOW_KEY: &str = "auth-flow";

/// Storage key holding the last [`crate::AuthResult`] (absent when anonymous)
pub const AUTH_RESULT_KEY: &str = "auth-result";

/// Default keychain service name for the keychain-backed store
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "io.ionic.acconfigng";

/// Default file name for the file-backed store
pub const DEFAULT_STORE_FILE: &str = "acconfig-store.json";

//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use acconfig_domain::AcConfigError;
use keyring::Error as KeyringError;
use serde_json::Error as JsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InfraError(#[from] pub AcConfigError);

impl From<InfraError> for AcConfigError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAcConfigError {
    fn into_acconfig(self) -> AcConfigError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → AcConfigError */
/* -------------------------------------------------------------------------- */

impl IntoAcConfigError for IoError {
    fn into_acconfig(self) -> AcConfigError {
        match self.kind() {
            ErrorKind::NotFound => AcConfigError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                AcConfigError::Storage(format!("permission denied: {self}"))
            }
            _ => AcConfigError::Storage(format!("I/O failure: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_acconfig())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → AcConfigError */
/* -------------------------------------------------------------------------- */

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(AcConfigError::from(value))
    }
}

impl IntoAcConfigError for TomlError {
    fn into_acconfig(self) -> AcConfigError {
        AcConfigError::Config(format!("invalid TOML: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_acconfig())
    }
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → AcConfigError */
/* -------------------------------------------------------------------------- */

impl IntoAcConfigError for KeyringError {
    fn into_acconfig(self) -> AcConfigError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => AcConfigError::NotFound("keychain entry not found".into()),
            BadEncoding(_) => {
                AcConfigError::Storage("keychain value is not valid UTF-8".into())
            }
            TooLong(name, limit) => AcConfigError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => {
                AcConfigError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            Ambiguous(entries) => AcConfigError::Storage(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => {
                AcConfigError::Storage(format!("keychain platform error: {err}"))
            }
            NoStorageAccess(err) => {
                AcConfigError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => AcConfigError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_acconfig())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyring_no_entry_maps_to_not_found() {
        let mapped: AcConfigError = InfraError::from(KeyringError::NoEntry).into();
        match mapped {
            AcConfigError::NotFound(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn keyring_too_long_maps_to_storage() {
        let err = KeyringError::TooLong("service".into(), 255);
        let mapped: AcConfigError = InfraError::from(err).into();
        match mapped {
            AcConfigError::Storage(msg) => assert!(msg.contains("255")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err = IoError::new(ErrorKind::NotFound, "acconfig.json");
        let mapped: AcConfigError = InfraError::from(err).into();
        assert!(matches!(mapped, AcConfigError::NotFound(_)));
    }

    #[test]
    fn io_other_maps_to_storage() {
        let err = IoError::new(ErrorKind::Other, "disk full");
        let mapped: AcConfigError = InfraError::from(err).into();
        match mapped {
            AcConfigError::Storage(msg) => assert!(msg.contains("disk full")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn toml_parse_failure_maps_to_config() {
        let err = toml::from_str::<toml::Value>("storage = [").unwrap_err();
        let mapped: AcConfigError = InfraError::from(err).into();
        assert!(matches!(mapped, AcConfigError::Config(_)));
    }
}

//! Error types for token issuance.

use thiserror::Error;

/// Failures of the `gen-token` flow.
///
/// Every variant is terminal for the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required option was not supplied (or was empty)
    #[error("{0} is missing. account_id, user_id and stk are mandatory. Aborting!")]
    MissingArgument(&'static str),

    /// The auth key-pair secret is absent or unreadable
    #[error(
        "RSA auth isn't configured. Please update Robusta and run gen-config to configure it. Aborting!"
    )]
    AuthNotConfigured { reason: String },

    /// `global_config.signing_key` is absent or empty
    #[error("signing_key is not defined. Please update Robusta and run gen-config")]
    MissingSigningKey,

    /// `global_config.signing_key` is not a UUID
    #[error(
        "Bad format for signing_key. Please run gen-config to generate a new valid signing_key for your account."
    )]
    InvalidSigningKey(#[source] uuid::Error),

    /// The playbooks config map could not be read or parsed
    #[error("Could not read the Robusta playbooks configuration: {0}")]
    PlaybooksConfigUnavailable(String),

    /// The backend profile could not be loaded
    #[error("Invalid backend profile: {0}")]
    InvalidProfile(String),

    /// No usable cluster connection
    #[error("Could not connect to the cluster: {0}")]
    ClusterUnavailable(String),

    /// The token store rejected the server record
    #[error("Failed to store server token{}. Aborting!", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    StoreFailed { status: Option<u16>, body: String },

    /// A token string could not be decoded
    #[error("Malformed token: {0}")]
    DecodeError(String),

    /// A payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Process exit code for this failure.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingArgument(_) => 2,
            Self::AuthNotConfigured { .. } => 3,
            Self::MissingSigningKey | Self::InvalidSigningKey(_) => 4,
            Self::StoreFailed { .. } => 5,
            Self::DecodeError(_) => 6,
            Self::PlaybooksConfigUnavailable(_) | Self::ClusterUnavailable(_) => 7,
            Self::InvalidProfile(_) | Self::Serialization(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        assert_eq!(AuthError::MissingArgument("stk").exit_code(), 2);
        assert_eq!(
            AuthError::AuthNotConfigured {
                reason: "secret not found".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(AuthError::MissingSigningKey.exit_code(), 4);
        assert_eq!(
            AuthError::StoreFailed {
                status: Some(500),
                body: String::new()
            }
            .exit_code(),
            5
        );
        assert_eq!(AuthError::DecodeError("bad".into()).exit_code(), 6);
    }

    #[test]
    fn test_store_failed_message() {
        let err = AuthError::StoreFailed {
            status: Some(500),
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "Failed to store server token (status 500). Aborting!");

        let err = AuthError::StoreFailed {
            status: None,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Failed to store server token. Aborting!");
    }

    #[test]
    fn test_missing_argument_names_the_option() {
        assert!(AuthError::MissingArgument("user_id")
            .to_string()
            .starts_with("user_id is missing"));
    }
}

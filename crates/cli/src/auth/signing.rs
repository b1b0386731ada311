//! Signing key lookup and the XOR split into encryption shares.
//!
//! The signing key is split into two 128-bit shares so that
//! `server XOR client == signing_key`. The backend stores only the server
//! share and the operator receives only the client share.

use std::str::FromStr;

use robusta_core::{GlobalConfig, PlaybooksConfig};
use tracing::debug;
use uuid::Uuid;

use super::error::AuthError;
use crate::cluster::ClusterSource;

/// Config map holding the runner's playbooks configuration.
pub const PLAYBOOKS_CONFIG_NAME: &str = "robusta-playbooks-config";

/// Key of the YAML document inside [`PLAYBOOKS_CONFIG_NAME`].
pub const PLAYBOOKS_CONFIG_KEY: &str = "active_playbooks.yaml";

/// Cluster-wide 128-bit signing key (`global_config.signing_key`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningKey(Uuid);

impl SigningKey {
    #[must_use]
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Extract and parse the key from a `global_config` section.
    ///
    /// # Errors
    ///
    /// [`AuthError::MissingSigningKey`] when absent or empty,
    /// [`AuthError::InvalidSigningKey`] when not a UUID.
    pub fn from_global_config(config: &GlobalConfig) -> Result<Self, AuthError> {
        config
            .signing_key()
            .ok_or(AuthError::MissingSigningKey)?
            .parse()
    }

    /// Split with a fresh random client share.
    #[must_use]
    pub fn split(&self) -> EncryptionShares {
        self.split_with(Uuid::new_v4())
    }

    /// Split using `client` as the client share.
    #[must_use]
    pub fn split_with(&self, client: Uuid) -> EncryptionShares {
        EncryptionShares {
            server: xor(self.0, client),
            client,
        }
    }
}

impl FromStr for SigningKey {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(AuthError::InvalidSigningKey)
    }
}

/// The two halves of a split signing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptionShares {
    /// Sent to the token store only.
    pub server: Uuid,
    /// Printed to the operator only.
    pub client: Uuid,
}

impl EncryptionShares {
    /// Recombine the shares into the signing key.
    #[must_use]
    pub fn combine(&self) -> SigningKey {
        SigningKey(xor(self.server, self.client))
    }
}

fn xor(a: Uuid, b: Uuid) -> Uuid {
    Uuid::from_u128(a.as_u128() ^ b.as_u128())
}

/// Read the signing key from the playbooks config map.
///
/// # Errors
///
/// [`AuthError::PlaybooksConfigUnavailable`] if the config map cannot be
/// read or parsed, otherwise the errors of [`SigningKey::from_global_config`].
pub async fn load_signing_key(
    cluster: &dyn ClusterSource,
    namespace: Option<&str>,
) -> Result<SigningKey, AuthError> {
    let data = cluster
        .config_map_data(namespace, PLAYBOOKS_CONFIG_NAME)
        .await
        .map_err(|e| AuthError::PlaybooksConfigUnavailable(format!("{e:#}")))?
        .ok_or_else(|| {
            AuthError::PlaybooksConfigUnavailable(format!(
                "config map {PLAYBOOKS_CONFIG_NAME} not found"
            ))
        })?;

    let document = data.get(PLAYBOOKS_CONFIG_KEY).ok_or_else(|| {
        AuthError::PlaybooksConfigUnavailable(format!(
            "{PLAYBOOKS_CONFIG_KEY} is missing from {PLAYBOOKS_CONFIG_NAME}"
        ))
    })?;

    let config = PlaybooksConfig::from_yaml(document)
        .map_err(|e| AuthError::PlaybooksConfigUnavailable(e.to_string()))?;

    let key = SigningKey::from_global_config(&config.global_config)?;
    debug!("Loaded signing key");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn test_shares_recombine() {
        let key: SigningKey = KEY.parse().unwrap();
        for _ in 0..32 {
            let shares = key.split();
            assert_eq!(shares.combine(), key);
            assert_ne!(shares.server, key.as_uuid());
        }
    }

    #[test]
    fn test_xor_is_its_own_inverse() {
        let key: SigningKey = KEY.parse().unwrap();
        let client = Uuid::new_v4();
        let shares = key.split_with(client);
        assert_eq!(xor(shares.server, client), key.as_uuid());
    }

    #[test]
    fn test_known_split() {
        let key = SigningKey::new(Uuid::from_u128(0xff00));
        let shares = key.split_with(Uuid::from_u128(0x0ff0));
        assert_eq!(shares.server, Uuid::from_u128(0xf0f0));
    }

    #[test]
    fn test_parse_accepts_simple_form() {
        let hyphenated: SigningKey = KEY.parse().unwrap();
        let simple: SigningKey = "123e4567e89b12d3a456426614174000".parse().unwrap();
        assert_eq!(hyphenated, simple);
    }

    #[test]
    fn test_invalid_key() {
        let err = "not-a-uuid".parse::<SigningKey>().unwrap_err();
        assert!(matches!(err, AuthError::InvalidSigningKey(_)));
    }

    #[test]
    fn test_missing_key() {
        let err = SigningKey::from_global_config(&GlobalConfig::default()).unwrap_err();
        assert!(matches!(err, AuthError::MissingSigningKey));

        let empty = GlobalConfig {
            signing_key: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            SigningKey::from_global_config(&empty),
            Err(AuthError::MissingSigningKey)
        ));
    }
}

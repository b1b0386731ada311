//! Robusta backend endpoints.
//!
//! The default profile targets `robusta.dev`. Setting
//! `ROBUSTA_BACKEND_PROFILE` to the path of a JSON file replaces it; keys
//! missing from the file keep their `robusta.dev` defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable pointing at a custom profile JSON file.
pub const ENV_BACKEND_PROFILE: &str = "ROBUSTA_BACKEND_PROFILE";

/// Domain used by the default profile.
pub const DEFAULT_DOMAIN: &str = "robusta.dev";

/// Endpoints of the Robusta SaaS backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendProfile {
    pub robusta_cloud_api_host: String,
    pub robusta_ui_domain: String,
    pub robusta_relay_ws_address: String,
    pub robusta_relay_external_actions_url: String,
    pub robusta_telemetry_endpoint: String,
    /// Token store endpoint used by `gen-token`.
    pub robusta_store_token_url: String,
    /// True when loaded from `ROBUSTA_BACKEND_PROFILE`.
    #[serde(skip)]
    pub custom_profile: bool,
}

impl BackendProfile {
    /// Build the standard endpoints under `domain`.
    #[must_use]
    pub fn from_domain(domain: &str) -> Self {
        Self {
            robusta_cloud_api_host: format!("https://api.{domain}"),
            robusta_ui_domain: format!("https://platform.{domain}"),
            robusta_relay_ws_address: format!("wss://relay.{domain}"),
            robusta_relay_external_actions_url: format!(
                "https://api.{domain}/integrations/generic/actions"
            ),
            robusta_telemetry_endpoint: format!("https://api.{domain}/telemetry"),
            robusta_store_token_url: format!("https://api.{domain}/auth/server/tokens"),
            custom_profile: false,
        }
    }

    /// Load a custom profile from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read backend profile {}", path.display()))?;
        let mut profile: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid backend profile {}", path.display()))?;
        profile.custom_profile = true;
        Ok(profile)
    }

    /// The custom profile if `ROBUSTA_BACKEND_PROFILE` is set, otherwise the default.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom profile is configured but cannot be loaded.
    pub fn load() -> Result<Self> {
        match std::env::var(ENV_BACKEND_PROFILE) {
            Ok(path) if !path.is_empty() => {
                info!(path = %path, "Using custom backend profile");
                Self::from_file(Path::new(&path))
            }
            _ => Ok(Self::default()),
        }
    }
}

impl Default for BackendProfile {
    fn default() -> Self {
        Self::from_domain(DEFAULT_DOMAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_profile() {
        let profile = BackendProfile::default();
        assert_eq!(profile.robusta_cloud_api_host, "https://api.robusta.dev");
        assert_eq!(
            profile.robusta_store_token_url,
            "https://api.robusta.dev/auth/server/tokens"
        );
        assert!(!profile.custom_profile);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"robusta_store_token_url": "http://localhost:8080/tokens"}}"#
        )
        .unwrap();

        let profile = BackendProfile::from_file(file.path()).unwrap();
        assert_eq!(profile.robusta_store_token_url, "http://localhost:8080/tokens");
        assert_eq!(profile.robusta_ui_domain, "https://platform.robusta.dev");
        assert!(profile.custom_profile);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(BackendProfile::from_file(file.path()).is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"robusta_cloud_api_host": "https://api.example.com"}}"#).unwrap();

        std::env::set_var(ENV_BACKEND_PROFILE, file.path());
        let profile = BackendProfile::load();
        std::env::remove_var(ENV_BACKEND_PROFILE);

        let profile = profile.unwrap();
        assert_eq!(profile.robusta_cloud_api_host, "https://api.example.com");
        assert!(profile.custom_profile);
    }

    #[test]
    #[serial]
    fn test_load_without_env() {
        std::env::remove_var(ENV_BACKEND_PROFILE);
        assert_eq!(BackendProfile::load().unwrap(), BackendProfile::default());
    }
}

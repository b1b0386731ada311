//! Typed `global_config` and playbooks configuration documents.
//!
//! The runner stores its configuration as a YAML document
//! (`active_playbooks.yaml`) inside a config map. Only `global_config` is
//! modelled here; the rest of the document is ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::templating::{resolve_in_place, EnvLookup};

/// Cluster-wide settings shared by every playbook action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// UUID used to derive token encryption shares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    /// Overrides in-cluster Prometheus discovery when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prometheus_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alertmanager_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grafana_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grafana_api_key: Option<String>,
    /// Any other keys, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl GlobalConfig {
    /// Merge `overrides` on top of `self`.
    ///
    /// Precedence is per field:
    /// - typed fields: the override wins when it is `Some`, otherwise the
    ///   base value is kept (an unset override never clears a base value)
    /// - `extra`: override keys replace base keys of the same name; every
    ///   replaced key is logged
    #[must_use]
    pub fn merge(&self, overrides: &GlobalConfig) -> GlobalConfig {
        let pick = |base: &Option<String>, over: &Option<String>| over.clone().or_else(|| base.clone());

        let mut extra = self.extra.clone();
        for (key, value) in &overrides.extra {
            if let Some(previous) = extra.insert(key.clone(), value.clone()) {
                if previous != *value {
                    debug!(key = %key, "global_config value overridden by action params");
                }
            }
        }

        GlobalConfig {
            signing_key: pick(&self.signing_key, &overrides.signing_key),
            account_id: pick(&self.account_id, &overrides.account_id),
            cluster_name: pick(&self.cluster_name, &overrides.cluster_name),
            prometheus_url: pick(&self.prometheus_url, &overrides.prometheus_url),
            alertmanager_url: pick(&self.alertmanager_url, &overrides.alertmanager_url),
            grafana_url: pick(&self.grafana_url, &overrides.grafana_url),
            grafana_api_key: pick(&self.grafana_api_key, &overrides.grafana_api_key),
            extra,
        }
    }

    /// Resolve `{{ env.NAME }}` placeholders in every string value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvVarMissing`] for the first placeholder whose
    /// variable is unset or empty.
    pub fn resolve_env(mut self, env: &dyn EnvLookup) -> Result<Self, ConfigError> {
        let typed = [
            ("signing_key", &mut self.signing_key),
            ("account_id", &mut self.account_id),
            ("cluster_name", &mut self.cluster_name),
            ("prometheus_url", &mut self.prometheus_url),
            ("alertmanager_url", &mut self.alertmanager_url),
            ("grafana_url", &mut self.grafana_url),
            ("grafana_api_key", &mut self.grafana_api_key),
        ];
        for (field, value) in typed {
            if let Some(value) = value.as_mut() {
                resolve_in_place(field, value, env)?;
            }
        }

        for (key, value) in &mut self.extra {
            if let serde_yaml::Value::String(s) = value {
                resolve_in_place(key, s, env)?;
            }
        }

        Ok(self)
    }

    /// The signing key, treating an empty string as absent.
    ///
    /// A whitespace-only key counts as present and fails UUID parsing later.
    #[must_use]
    pub fn signing_key(&self) -> Option<&str> {
        self.signing_key.as_deref().filter(|s| !s.is_empty())
    }
}

/// The `active_playbooks.yaml` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybooksConfig {
    #[serde(default)]
    pub global_config: GlobalConfig,
}

impl PlaybooksConfig {
    /// Parse the raw YAML document. Placeholders are left unresolved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document is not valid YAML.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Parse the document and resolve placeholders in `global_config`.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or a placeholder cannot be resolved.
    pub fn load(raw: &str, env: &dyn EnvLookup) -> Result<Self, ConfigError> {
        let mut config = Self::from_yaml(raw)?;
        config.global_config = config.global_config.resolve_env(env)?;
        Ok(config)
    }
}

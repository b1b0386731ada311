//! Error types for configuration loading and discovery.

use thiserror::Error;

/// Errors raised while loading or resolving configuration documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `{{ env.NAME }}` placeholder referenced an unset or empty variable
    #[error("environment variable {name} referenced by {field} is not set")]
    EnvVarMissing { name: String, field: String },

    /// The YAML document could not be parsed
    #[error("invalid configuration document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised while looking up services in the cluster.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Kubernetes API call failed
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
}

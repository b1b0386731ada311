//! Read access to the cluster objects the CLI depends on.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::{api::Api, Client};
use tracing::debug;

/// Cluster reads used by token issuance.
///
/// `namespace: None` means the namespace of the current kube context.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// Decoded `data` of a secret, or `None` when the secret does not exist.
    async fn secret_data(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<BTreeMap<String, Vec<u8>>>>;

    /// `data` of a config map, or `None` when the config map does not exist.
    async fn config_map_data(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<BTreeMap<String, String>>>;
}

/// [`ClusterSource`] backed by the Kubernetes API.
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    /// Connect using the default kubeconfig / in-cluster configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable kube configuration is found.
    pub async fn connect() -> Result<Self> {
        let client = Client::try_default()
            .await
            .context("Failed to load kubeconfig")?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    fn namespace<'a>(&'a self, namespace: Option<&'a str>) -> &'a str {
        namespace.unwrap_or_else(|| self.client.default_namespace())
    }
}

#[async_trait]
impl ClusterSource for KubeCluster {
    async fn secret_data(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<BTreeMap<String, Vec<u8>>>> {
        let namespace = self.namespace(namespace);
        debug!(namespace, name, "Reading secret");

        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = secrets
            .get_opt(name)
            .await
            .with_context(|| format!("Failed to read secret {namespace}/{name}"))?;

        Ok(secret.map(|s| {
            s.data
                .unwrap_or_default()
                .into_iter()
                .map(|(key, value)| (key, value.0))
                .collect()
        }))
    }

    async fn config_map_data(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<BTreeMap<String, String>>> {
        let namespace = self.namespace(namespace);
        debug!(namespace, name, "Reading config map");

        let config_maps: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let config_map = config_maps
            .get_opt(name)
            .await
            .with_context(|| format!("Failed to read config map {namespace}/{name}"))?;

        Ok(config_map.map(|cm| cm.data.unwrap_or_default()))
    }
}

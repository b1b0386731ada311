//! In-cluster service discovery.
//!
//! Discovered URLs are memoized in a [`DiscoveryCache`] owned by the caller
//! and passed by reference, so every lookup site shares the same cache and
//! can invalidate an entry when the URL stops working.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, ListParams};
use kube::Client;
use tracing::{debug, error, info, warn};

use crate::error::DiscoveryError;

/// Cache key for the Prometheus server URL.
pub const PROMETHEUS: &str = "prometheus";

/// Label selectors tried in order when looking for Prometheus.
pub const PROMETHEUS_SELECTORS: &[&str] = &[
    "app=kube-prometheus-stack-prometheus",
    "app.kubernetes.io/name=prometheus",
];

/// Finds the URL of a service matching a label selector.
#[async_trait]
pub trait ServiceLocator: Send + Sync {
    /// Return the URL of the first service matching `label_selector`.
    async fn find_service_url(&self, label_selector: &str)
        -> Result<Option<String>, DiscoveryError>;
}

/// [`ServiceLocator`] backed by the Kubernetes API.
pub struct KubeServiceLocator {
    client: Client,
}

impl KubeServiceLocator {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Cluster-local URL for a service, using its first port.
#[must_use]
pub fn service_url(service: &Service) -> Option<String> {
    let name = service.metadata.name.as_deref()?;
    let namespace = service.metadata.namespace.as_deref().unwrap_or("default");
    let port = service
        .spec
        .as_ref()
        .and_then(|spec| spec.ports.as_ref())
        .and_then(|ports| ports.first())
        .map(|port| port.port)?;
    Some(format!("http://{name}.{namespace}.svc.cluster.local:{port}"))
}

#[async_trait]
impl ServiceLocator for KubeServiceLocator {
    async fn find_service_url(
        &self,
        label_selector: &str,
    ) -> Result<Option<String>, DiscoveryError> {
        let services: Api<Service> = Api::all(self.client.clone());
        let list = services
            .list(&ListParams::default().labels(label_selector))
            .await?;

        let url = list.items.iter().find_map(service_url);
        match &url {
            Some(url) => debug!(selector = label_selector, url = %url, "Found service"),
            None => debug!(selector = label_selector, "No service matched selector"),
        }
        Ok(url)
    }
}

/// Process-scoped memo of discovered service URLs.
#[derive(Debug, Default)]
pub struct DiscoveryCache {
    urls: Mutex<HashMap<String, String>>,
}

impl DiscoveryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn insert(&self, key: &str, url: String) {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), url);
    }

    /// Drop a single entry so the next lookup hits the cluster again.
    pub fn invalidate(&self, key: &str) -> Option<String> {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    pub fn clear(&self) {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Locates the in-cluster Prometheus server.
pub struct PrometheusDiscovery<'a> {
    locator: &'a dyn ServiceLocator,
    cache: &'a DiscoveryCache,
}

impl<'a> PrometheusDiscovery<'a> {
    #[must_use]
    pub fn new(locator: &'a dyn ServiceLocator, cache: &'a DiscoveryCache) -> Self {
        Self { locator, cache }
    }

    /// Return the cached URL, or try each known selector and cache the first hit.
    ///
    /// Lookup failures for one selector are logged and the next selector is
    /// tried. Returns `None` when nothing matched; nothing is cached then.
    pub async fn find_prometheus_url(&self) -> Option<String> {
        if let Some(url) = self.cache.get(PROMETHEUS) {
            return Some(url);
        }

        for selector in PROMETHEUS_SELECTORS {
            match self.locator.find_service_url(selector).await {
                Ok(Some(url)) => {
                    info!(url = %url, "Discovered Prometheus");
                    self.cache.insert(PROMETHEUS, url.clone());
                    return Some(url);
                }
                Ok(None) => {}
                Err(e) => warn!(selector, error = %e, "Prometheus lookup failed"),
            }
        }

        error!("Prometheus url could not be found. Add 'prometheus_url' under global_config");
        None
    }

    /// Forget the cached URL.
    pub fn invalidate(&self) {
        self.cache.invalidate(PROMETHEUS);
    }
}

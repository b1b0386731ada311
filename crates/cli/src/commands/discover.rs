//! `discover-prometheus`: locate the in-cluster Prometheus server.

use anyhow::{bail, Result};
use clap::Args;
use robusta_core::{DiscoveryCache, KubeServiceLocator, PrometheusDiscovery};

use crate::cluster::KubeCluster;

/// Find the URL of the in-cluster Prometheus server
#[derive(Args, Debug)]
pub struct DiscoverPrometheusCommand {}

impl DiscoverPrometheusCommand {
    /// Print the discovered URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster is unreachable or no Prometheus service exists.
    pub async fn run(&self, cache: &DiscoveryCache) -> Result<()> {
        let cluster = KubeCluster::connect().await?;
        let locator = KubeServiceLocator::new(cluster.client());

        match PrometheusDiscovery::new(&locator, cache).find_prometheus_url().await {
            Some(url) => {
                println!("{url}");
                Ok(())
            }
            None => bail!(
                "Prometheus url could not be found. Add 'prometheus_url' under global_config"
            ),
        }
    }
}

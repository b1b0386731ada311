//! Shared building blocks for the Robusta runner and CLI.
//!
//! - [`config`]: typed `global_config` documents and their merge rules
//! - [`templating`]: `{{ env.NAME }}` placeholder resolution
//! - [`discovery`]: in-cluster service discovery with an explicit cache
//! - [`matchers`]: trigger filter predicates

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod matchers;
pub mod templating;

pub use config::{GlobalConfig, PlaybooksConfig};
pub use discovery::{DiscoveryCache, KubeServiceLocator, PrometheusDiscovery, ServiceLocator};
pub use error::{ConfigError, DiscoveryError};

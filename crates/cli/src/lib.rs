//! Robusta command line tool.
//!
//! The main flow is token issuance for the Robusta UI (see [`auth`]). The
//! cluster is reached through the [`cluster::ClusterSource`] seam and the
//! token store through [`auth::TokenStore`], so the flow can run against
//! fakes in tests.
//!
//! # Example
//!
//! ```ignore
//! use robusta_cli::auth::{self, HttpTokenStore, TokenRequest};
//! use robusta_cli::cluster::KubeCluster;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let request = TokenRequest::new(Some("acct".into()), Some("user".into()), Some("stk".into()))?;
//!     let cluster = KubeCluster::connect().await?;
//!     let store = HttpTokenStore::new("https://api.robusta.dev/auth/server/tokens");
//!     println!("{}", auth::gen_token(&request, None, &cluster, &store).await?);
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Allow product names without backticks in doc comments
#![allow(clippy::doc_markdown)]

pub mod auth;
pub mod cluster;
pub mod commands;
pub mod profile;
pub mod ui;

pub use auth::AuthError;
pub use profile::BackendProfile;

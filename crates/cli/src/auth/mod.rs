//! Tokens for running actions manually from the Robusta UI.
//!
//! Issuance flow:
//! 1. [`KeyPairProvider`] reads the cluster's key pair secret
//! 2. [`load_signing_key`] reads `global_config.signing_key`
//! 3. [`TokenIssuer`] splits the signing key, stores the server share
//! 4. [`TokenCodec`] encodes the client token for the operator
//!
//! Every step completes before the next one starts and nothing reaches the
//! token store unless all preconditions passed.

pub mod codec;
pub mod error;
pub mod issuer;
pub mod keys;
pub mod signing;
pub mod store;

pub use codec::TokenCodec;
pub use error::AuthError;
pub use issuer::{TokenDetails, TokenIssuer, TokenRequest};
pub use keys::{KeyPair, KeyPairProvider, AUTH_SECRET_NAME};
pub use signing::{load_signing_key, EncryptionShares, SigningKey};
pub use store::{HttpTokenStore, TokenStore};

use tracing::info;

use crate::cluster::ClusterSource;

/// Run the whole issuance flow and return the encoded client token.
///
/// # Errors
///
/// Returns the [`AuthError`] of the first step that failed.
pub async fn gen_token(
    request: &TokenRequest,
    namespace: Option<&str>,
    cluster: &dyn ClusterSource,
    store: &dyn TokenStore,
) -> Result<String, AuthError> {
    info!(namespace = namespace.unwrap_or("<current>"), "Generating token");

    let key_pair = KeyPairProvider::new(cluster).load(namespace).await?;
    let signing_key = load_signing_key(cluster, namespace).await?;

    let client_token = TokenIssuer::new(store)
        .issue(request, &signing_key, &key_pair.public_key)
        .await?;

    TokenCodec::encode(&client_token)
}

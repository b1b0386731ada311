//! Token issuance.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::AuthError;
use super::signing::SigningKey;
use super::store::TokenStore;

/// Token payload, used both for the stored server record and the client token.
///
/// The two differ only in `enc_key`: the server record carries the server
/// share, the client token the client share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
    /// OpenSSH public key of the cluster.
    #[serde(rename = "pub")]
    pub public_key: String,
    pub account_id: String,
    pub user_id: String,
    /// UI session token of the user.
    pub stk: String,
    pub enc_key: String,
    pub key_id: String,
}

/// Validated `gen-token` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub account_id: String,
    pub user_id: String,
    pub stk: String,
}

impl TokenRequest {
    /// Validate the raw options. Empty strings count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingArgument`] naming the first missing option.
    pub fn new(
        account_id: Option<String>,
        user_id: Option<String>,
        stk: Option<String>,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            account_id: required("account_id", account_id)?,
            user_id: required("user_id", user_id)?,
            stk: required("stk", stk)?,
        })
    }
}

fn required(name: &'static str, value: Option<String>) -> Result<String, AuthError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AuthError::MissingArgument(name))
}

/// Issues tokens by splitting the signing key and storing the server share.
pub struct TokenIssuer<'a> {
    store: &'a dyn TokenStore,
}

impl<'a> TokenIssuer<'a> {
    #[must_use]
    pub fn new(store: &'a dyn TokenStore) -> Self {
        Self { store }
    }

    /// Issue a token and return the client-facing payload.
    ///
    /// The server record is stored first; the client token is only built
    /// once the store accepted it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreFailed`] if the store rejects the record.
    pub async fn issue(
        &self,
        request: &TokenRequest,
        signing_key: &SigningKey,
        public_key: &str,
    ) -> Result<TokenDetails, AuthError> {
        let shares = signing_key.split();
        let key_id = Uuid::new_v4().to_string();

        let mut token = TokenDetails {
            public_key: public_key.to_string(),
            account_id: request.account_id.clone(),
            user_id: request.user_id.clone(),
            stk: request.stk.clone(),
            enc_key: shares.server.to_string(),
            key_id,
        };
        self.store.store(&token).await?;

        token.enc_key = shares.client.to_string();
        info!(
            account_id = %token.account_id,
            user_id = %token.user_id,
            key_id = %token.key_id,
            "Token issued"
        );
        Ok(token)
    }
}

//! Server-side token store.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info};

use super::error::AuthError;
use super::issuer::TokenDetails;

/// Persists the server half of a token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Store `record`. Any failure aborts issuance.
    async fn store(&self, record: &TokenDetails) -> Result<(), AuthError>;
}

/// [`TokenStore`] that posts records to the Robusta backend.
pub struct HttpTokenStore {
    url: String,
    client: reqwest::Client,
}

impl HttpTokenStore {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TokenStore for HttpTokenStore {
    async fn store(&self, record: &TokenDetails) -> Result<(), AuthError> {
        debug!(url = %self.url, key_id = %record.key_id, "Storing server token");

        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "Error trying to store server token");
                AuthError::StoreFailed {
                    status: None,
                    body: e.to_string(),
                }
            })?;

        let status = response.status();
        if status == StatusCode::CREATED {
            info!(key_id = %record.key_id, "Server token stored");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = %status, body = %body, "Failed to store server token");
        Err(AuthError::StoreFailed {
            status: Some(status.as_u16()),
            body,
        })
    }
}

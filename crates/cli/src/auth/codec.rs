//! Transport encoding for tokens handed to the Robusta UI.
//!
//! The payload is serialized to JSON, that JSON text is serialized again as a
//! JSON string, and the result is base64 encoded (standard alphabet, padded).
//! The UI expects this double encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::AuthError;

/// Encodes and decodes operator-facing tokens.
pub struct TokenCodec;

impl TokenCodec {
    /// Encode `payload` into the transport string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Serialization`] if the payload cannot be serialized.
    pub fn encode<T: Serialize>(payload: &T) -> Result<String, AuthError> {
        let json = serde_json::to_string(payload)?;
        let wrapped = serde_json::to_string(&json)?;
        Ok(STANDARD.encode(wrapped))
    }

    /// Decode a transport string produced by [`TokenCodec::encode`].
    ///
    /// Only the structure is checked; field values are not validated.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DecodeError`] on invalid base64, UTF-8 or JSON.
    pub fn decode<T: DeserializeOwned>(token: &str) -> Result<T, AuthError> {
        let bytes = STANDARD
            .decode(token.trim())
            .map_err(|e| AuthError::DecodeError(format!("invalid base64: {e}")))?;
        let wrapped = String::from_utf8(bytes)
            .map_err(|e| AuthError::DecodeError(format!("invalid UTF-8: {e}")))?;
        let json: String = serde_json::from_str(&wrapped)
            .map_err(|e| AuthError::DecodeError(format!("expected a JSON string: {e}")))?;
        serde_json::from_str(&json)
            .map_err(|e| AuthError::DecodeError(format!("invalid token payload: {e}")))
    }
}

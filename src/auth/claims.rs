//! Unverified decoding of the claims segment of a compact `header.claims.signature`
//! token. The signature is never checked: decoded claims are only good for UX
//! decisions such as hiding the login page, never for access control.

use base64ct::{Base64Unpadded, Base64UrlUnpadded, Encoding};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Expiry in seconds since the epoch. Fractional values are accepted.
    #[serde(default)]
    pub exp: Option<f64>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl TokenClaims {
    /// True iff `exp` is present and strictly after `now_unix_seconds`.
    #[must_use]
    pub fn is_live_at(&self, now_unix_seconds: i64) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let now = now_unix_seconds as f64;
        self.exp.is_some_and(|exp| exp > now)
    }
}

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64 encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
}

/// Decodes the middle segment of `token` as JSON claims. Both the URL-safe and
/// the standard alphabet are accepted, with or without padding.
///
/// # Errors
/// Returns an error if the token has no claims segment, or the segment is not
/// valid base64 or JSON.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let segment = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(ClaimsError::TokenFormat)?;
    let segment = segment.trim_end_matches('=');

    let bytes = Base64UrlUnpadded::decode_vec(segment)
        .or_else(|_| Base64Unpadded::decode_vec(segment))
        .map_err(|_| ClaimsError::Base64)?;

    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &Value) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.signature")
}

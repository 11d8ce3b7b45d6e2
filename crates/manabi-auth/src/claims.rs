use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Unverified claims read from a stored access token.
///
/// The signature is NOT checked; the backend is the authority. This is only
/// used to show who is signed in and whether the token is about to expire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// `sub` claim (user ID or email, depending on the backend).
    pub subject: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the JWT format is invalid or the
    /// `exp` claim is missing or cannot be parsed.
    pub fn decode(jwt: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = jwt.split('.').collect();
        if parts.len() != 3 {
            return Err(AuthError::InvalidToken("invalid JWT format".into()));
        }
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
        let value: serde_json::Value = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))?;
        let exp = value["exp"]
            .as_i64()
            .ok_or_else(|| AuthError::InvalidToken("missing exp claim".into()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))?;

        Ok(Self {
            subject: value["sub"].as_str().map(str::to_string),
            expires_at,
        })
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}

/// Decode only the `exp` claim.
///
/// # Errors
///
/// See [`TokenClaims::decode`].
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    TokenClaims::decode(jwt).map(|claims| claims.expires_at)
}

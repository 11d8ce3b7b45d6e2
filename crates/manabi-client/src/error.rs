//! Normalized client error.
//!
//! Every failure that reaches a caller is an [`ApiError`] whose `Display`
//! output is a message fit for showing to the user. Transport failures and
//! structured API errors share the same shape, so call sites only branch on
//! [`ApiError::kind`] when they care.

use thiserror::Error;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received (connect, DNS, timeout, bad URL).
    Transport,
    /// The backend rejected the credential and no recovery is possible.
    Authentication,
    /// Any other non-success response or an unusable payload.
    Application,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No HTTP response was received.
    #[error("{message}")]
    Transport { message: String },

    /// 401 that is not eligible for a refresh (auth/public endpoint, or the
    /// request was already retried once).
    #[error("{message}")]
    Unauthorized { message: String },

    /// The refresh routine failed; stored credentials have been cleared.
    #[error("{message}")]
    SessionExpired { message: String },

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A success response body did not match the expected shape.
    #[error("unexpected response from server: {0}")]
    Decode(String),

    /// A request body could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(String),

    /// The request URL could not be built from the configured base URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The local credential store could not be read or written.
    #[error("could not access stored credentials: {0}")]
    Credentials(String),
}

impl ApiError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::InvalidUrl(_) => ErrorKind::Transport,
            Self::Unauthorized { .. } | Self::SessionExpired { .. } => ErrorKind::Authentication,
            Self::Api { .. } | Self::Decode(_) | Self::Encode(_) | Self::Credentials(_) => {
                ErrorKind::Application
            }
        }
    }

    /// Display-ready message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the failure came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } | Self::SessionExpired { .. } => Some(401),
            _ => None,
        }
    }

    pub(crate) fn session_expired() -> Self {
        Self::SessionExpired {
            message: "Your session has expired. Please sign in again.".into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "The server took too long to respond. Please try again.".to_string()
        } else if error.is_connect() {
            "Could not connect to the server. Check your network connection.".to_string()
        } else if error.is_builder() {
            return Self::InvalidUrl(error.to_string());
        } else {
            format!("Network error: {error}")
        };
        Self::Transport { message }
    }
}

impl From<manabi_auth::AuthError> for ApiError {
    fn from(error: manabi_auth::AuthError) -> Self {
        Self::Credentials(error.to_string())
    }
}

//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_ai_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("manabi/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Main backend base URL (courses, forum, admin, auth).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// AI tutor backend base URL.
    #[serde(default = "default_ai_base_url")]
    pub ai_base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// The hosting origin is served over HTTPS; plain `http://` base URLs
    /// are upgraded to avoid mixed content.
    #[serde(default)]
    pub secure_origin: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ai_base_url: default_ai_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            secure_origin: false,
        }
    }
}

impl ApiConfig {
    /// Resolved main backend URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `base_url` is not an
    /// `http(s)://` URL with a host.
    pub fn main_url(&self) -> Result<String, ConfigError> {
        resolve_base_url("api.base_url", &self.base_url, self.secure_origin)
    }

    /// Resolved AI tutor backend URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `ai_base_url` is not an
    /// `http(s)://` URL with a host.
    pub fn ai_url(&self) -> Result<String, ConfigError> {
        resolve_base_url("api.ai_base_url", &self.ai_base_url, self.secure_origin)
    }

    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Normalize a base URL: trim whitespace and trailing slashes, and upgrade
/// `http://` to `https://` when `secure_origin` is set.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] (naming `field`) for an empty value,
/// a scheme other than `http`/`https`, or a missing host.
pub fn resolve_base_url(
    field: &str,
    raw: &str,
    secure_origin: bool,
) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(invalid("must not be empty"));
    }

    let (scheme, rest) = trimmed
        .split_once("://")
        .ok_or_else(|| invalid("missing scheme (expected http:// or https://)"))?;
    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if rest.split('/').next().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }

    let scheme = if secure_origin { "https" } else { scheme.as_str() };
    Ok(format!("{scheme}://{rest}"))
}

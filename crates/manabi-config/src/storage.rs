//! Credential storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where credentials (token, refresh token, user profile) are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// OS keychain for tokens, file fallback.
    #[default]
    Keyring,
    /// JSON file under the user's home directory.
    File,
    /// Process memory only; nothing survives exit.
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Override for the credentials file (default `~/.manabi/credentials.json`).
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    /// Keychain service name (default `manabi-cli`).
    #[serde(default)]
    pub keyring_service: Option<String>,
}

//! # manabi-config
//!
//! Layered configuration loading for the Manabi client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MANABI_*` prefix, `__` as separator)
//! 2. Project-level `.manabi/config.toml`
//! 3. User-level `~/.config/manabi/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MANABI_API__BASE_URL` -> `api.base_url`,
//! `MANABI_STORAGE__BACKEND` -> `storage.backend`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use manabi_config::ManabiConfig;
//!
//! let config = ManabiConfig::load_with_dotenv().expect("config");
//! println!("main API: {}", config.api.main_url().expect("valid URL"));
//! ```

mod api;
mod error;
mod storage;

pub use api::{ApiConfig, resolve_base_url};
pub use error::ConfigError;
pub use storage::{StorageBackend, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ManabiConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ManabiConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".manabi/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("MANABI_").split("__"))
    }

    /// Validate both base URLs eagerly so misconfiguration fails at startup
    /// rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first malformed URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.main_url()?;
        self.api.ai_url()?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("manabi").join("config.toml"))
    }
}

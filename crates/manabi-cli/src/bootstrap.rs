use std::sync::Arc;

use anyhow::Context;
use manabi_auth::{CredentialStore, FileStore, KeyringStore, MemoryStore, Session};
use manabi_client::{Backends, SessionExpiredHook};
use manabi_config::{ManabiConfig, StorageBackend, StorageConfig};

/// Loaded configuration plus the two backend clients built from it.
pub struct AppContext {
    pub config: ManabiConfig,
    pub backends: Backends,
}

impl AppContext {
    pub fn init() -> anyhow::Result<Self> {
        let config = load_config()?;
        let store = open_store(&config.storage)?;
        tracing::debug!(backend = store.backend(), "credential store ready");

        let backends = Backends::from_config(
            &config.api,
            Session::new(store),
            Some(session_expired_notice()),
        )
        .context("failed to build API clients")?;
        Ok(Self { config, backends })
    }
}

fn load_config() -> anyhow::Result<ManabiConfig> {
    let config = ManabiConfig::load_with_dotenv().context("failed to load configuration")?;
    config.validate()?;
    Ok(config)
}

/// Build the credential store selected by `storage.backend`.
pub fn open_store(storage: &StorageConfig) -> anyhow::Result<Arc<dyn CredentialStore>> {
    let file = || -> anyhow::Result<FileStore> {
        match &storage.credentials_path {
            Some(path) => Ok(FileStore::new(path.clone())),
            None => FileStore::at_default_path().context("cannot locate credentials file"),
        }
    };

    Ok(match storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(file()?),
        StorageBackend::Keyring => Arc::new(KeyringStore::new(
            storage.keyring_service.as_deref(),
            file()?,
        )),
    })
}

fn session_expired_notice() -> SessionExpiredHook {
    Arc::new(|| {
        eprintln!("session expired — run `manabi auth login`");
    })
}

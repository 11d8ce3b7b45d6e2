use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "manabi-cli";
const CREDENTIALS_DIR_NAME: &str = ".manabi";
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Keys of the persisted client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Bearer access token.
    Token,
    RefreshToken,
    /// Serialized [`manabi_core::entities::UserProfile`].
    User,
}

impl StorageKey {
    pub const ALL: [Self; 3] = [Self::Token, Self::RefreshToken, Self::User];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::RefreshToken => "refreshToken",
            Self::User => "user",
        }
    }
}

/// Persistent key/value storage for credentials.
///
/// Implementations must be read-after-write consistent: a value passed to
/// [`set`](Self::set) is returned by the next [`get`](Self::get). Empty
/// values read back as `None`.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`AuthError`] if the backing storage cannot be written.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), AuthError>;

    /// Remove a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the backing storage cannot be written.
    fn remove(&self, key: StorageKey) -> Result<(), AuthError>;

    /// Remove every credential key.
    ///
    /// # Errors
    ///
    /// Returns the first removal error.
    fn clear(&self) -> Result<(), AuthError> {
        for key in StorageKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Short backend name for status output.
    fn backend(&self) -> &'static str;
}

// --- Memory ---

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.get(&key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), AuthError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), AuthError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(&key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

// --- File ---

/// JSON document of `key -> value` on disk, `0600` inside a `0700` directory.
///
/// Every `get` re-reads the file so changes made by another process are
/// picked up immediately.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at `~/.manabi/credentials.json`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the home directory is unknown.
    pub fn at_default_path() -> Result<Self, AuthError> {
        Ok(Self::new(default_credentials_path()?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        if content.trim().is_empty() {
            return BTreeMap::new();
        }
        serde_json::from_str(&content).unwrap_or_else(|error| {
            tracing::warn!(%error, path = %self.path.display(), "credentials file is corrupt; ignoring");
            BTreeMap::new()
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if values.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| {
                    AuthError::TokenStoreError(format!("failed to delete {}: {e}", self.path.display()))
                })?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let body = serde_json::to_string_pretty(values)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize credentials: {e}")))?;
        fs::write(&self.path, body)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.read_all()
            .remove(key.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_all();
        values.insert(key.as_str().to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: StorageKey) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_all();
        if values.remove(key.as_str()).is_none() {
            return Ok(());
        }
        self.write_all(&values)
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

// --- Keyring ---

/// OS keychain for tokens, falling back to a [`FileStore`] when the keychain
/// is unavailable. The user profile always lives in the file.
#[derive(Debug)]
pub struct KeyringStore {
    service: String,
    fallback: FileStore,
}

impl KeyringStore {
    #[must_use]
    pub fn new(service: Option<&str>, fallback: FileStore) -> Self {
        Self {
            service: service.unwrap_or(DEFAULT_KEYRING_SERVICE).to_string(),
            fallback,
        }
    }

    fn entry(&self, key: StorageKey) -> Option<keyring::Entry> {
        if key == StorageKey::User {
            return None;
        }
        match keyring::Entry::new(&self.service, key.as_str()) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        if let Some(entry) = self.entry(key)
            && let Ok(value) = entry.get_password()
            && !value.is_empty()
        {
            return Some(value);
        }
        self.fallback.get(key)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), AuthError> {
        let Some(entry) = self.entry(key) else {
            return self.fallback.set(key, value);
        };
        match entry.set_password(value) {
            Ok(()) => {
                // drop any copy left behind by an earlier fallback write
                self.fallback.remove(key)
            }
            Err(error) => {
                tracing::warn!(%error, key = key.as_str(), "keyring store failed; falling back to file");
                self.fallback.set(key, value)
            }
        }
    }

    fn remove(&self, key: StorageKey) -> Result<(), AuthError> {
        if let Some(entry) = self.entry(key) {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(error) => return Err(AuthError::KeyringError(error.to_string())),
            }
        }
        self.fallback.remove(key)
    }

    fn backend(&self) -> &'static str {
        "keyring"
    }
}

/// `~/.manabi/credentials.json`.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the home directory is unknown.
pub fn default_credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(CREDENTIALS_DIR_NAME).join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found — cannot store credentials".into())
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_path_is_under_home() {
        let path = default_credentials_path().expect("should resolve");
        assert!(path.ends_with(".manabi/credentials.json"));
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get(StorageKey::Token).is_none());
        store.set(StorageKey::Token, "abc").unwrap();
        assert_eq!(store.get(StorageKey::Token).as_deref(), Some("abc"));
        store.set(StorageKey::Token, "def").unwrap();
        assert_eq!(store.get(StorageKey::Token).as_deref(), Some("def"));
        store.remove(StorageKey::Token).unwrap();
        assert!(store.get(StorageKey::Token).is_none());
    }

    #[test]
    fn memory_store_treats_empty_as_absent() {
        let store = MemoryStore::new();
        store.set(StorageKey::RefreshToken, "").unwrap();
        assert!(store.get(StorageKey::RefreshToken).is_none());
    }

    #[test]
    fn clear_removes_every_key() {
        let store = MemoryStore::new();
        for key in StorageKey::ALL {
            store.set(key, "x").unwrap();
        }
        store.clear().unwrap();
        for key in StorageKey::ALL {
            assert!(store.get(key).is_none(), "{} should be cleared", key.as_str());
        }
    }

    #[test]
    fn file_store_set_get_remove_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path().join("nested").join("credentials.json"));

        store.set(StorageKey::Token, "jwt_abc123").unwrap();
        store.set(StorageKey::User, r#"{"id":1}"#).unwrap();
        assert_eq!(store.get(StorageKey::Token).as_deref(), Some("jwt_abc123"));
        assert_eq!(store.get(StorageKey::User).as_deref(), Some(r#"{"id":1}"#));

        let raw = fs::read_to_string(store.path()).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.get("token").map(String::as_str), Some("jwt_abc123"));

        store.remove(StorageKey::Token).unwrap();
        assert!(store.get(StorageKey::Token).is_none());
        assert!(store.get(StorageKey::User).is_some());

        store.clear().unwrap();
        assert!(!store.path().exists(), "empty store should delete the file");
    }

    #[cfg(unix)]
    #[test]
    fn file_store_uses_private_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path().join("creds").join("credentials.json"));
        store.set(StorageKey::Token, "secret").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "credentials file should be 0600");
        let dir_mode = fs::metadata(tmp.path().join("creds")).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[test]
    fn file_store_ignores_corrupt_and_blank_files() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials.json");

        fs::write(&path, "   \n  ").unwrap();
        let store = FileStore::new(&path);
        assert!(store.get(StorageKey::Token).is_none());

        fs::write(&path, "{not json").unwrap();
        assert!(store.get(StorageKey::Token).is_none());

        // a write replaces the corrupt document
        store.set(StorageKey::Token, "fresh").unwrap();
        assert_eq!(store.get(StorageKey::Token).as_deref(), Some("fresh"));
    }

    #[test]
    fn file_store_sees_external_writes() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials.json");
        let store = FileStore::new(&path);
        store.set(StorageKey::Token, "first").unwrap();

        fs::write(&path, r#"{"token":"second"}"#).unwrap();
        assert_eq!(store.get(StorageKey::Token).as_deref(), Some("second"));
    }
}

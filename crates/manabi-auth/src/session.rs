//! Typed access to the persisted session.

use std::sync::Arc;

use manabi_core::entities::UserProfile;

use crate::claims::TokenClaims;
use crate::error::AuthError;
use crate::token_store::{CredentialStore, StorageKey};

/// Session facade over a shared [`CredentialStore`].
///
/// Cheap to clone; all clones see the same store. Reads always go to the
/// store so a token written by one holder is visible to the next request.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("backend", &self.store.backend())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get(StorageKey::Token)
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(StorageKey::RefreshToken)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// # Errors
    ///
    /// Propagates store write failures.
    pub fn set_token(&self, token: &str) -> Result<(), AuthError> {
        self.store.set(StorageKey::Token, token)
    }

    /// Persist a token pair. A `None` refresh token keeps the stored one
    /// (backends that do not rotate refresh tokens omit it).
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub fn set_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), AuthError> {
        self.store.set(StorageKey::Token, access)?;
        if let Some(refresh) = refresh {
            self.store.set(StorageKey::RefreshToken, refresh)?;
        }
        Ok(())
    }

    /// The stored user profile, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ProfileDecode` if the stored JSON does not match
    /// [`UserProfile`].
    pub fn user(&self) -> Result<Option<UserProfile>, AuthError> {
        self.store
            .get(StorageKey::User)
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(AuthError::from)
    }

    /// # Errors
    ///
    /// Propagates serialization or store write failures.
    pub fn set_user(&self, user: &UserProfile) -> Result<(), AuthError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(StorageKey::User, &raw)
    }

    /// Unverified claims of the stored token, if it is a JWT.
    #[must_use]
    pub fn claims(&self) -> Option<TokenClaims> {
        self.token().and_then(|jwt| TokenClaims::decode(&jwt).ok())
    }

    /// Clear every stored credential.
    ///
    /// # Errors
    ///
    /// Propagates store removal failures.
    pub fn invalidate(&self) -> Result<(), AuthError> {
        tracing::info!(backend = self.store.backend(), "clearing stored credentials");
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::token_store::MemoryStore;

    fn session() -> Session {
        Session::new(Arc::new(MemoryStore::new()))
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: 42,
            email: "taro@example.jp".into(),
            username: "taro".into(),
            full_name: Some("山田太郎".into()),
            avatar_url: None,
            roles: vec!["USER".into()],
            email_verified: true,
        }
    }

    #[test]
    fn set_tokens_keeps_refresh_when_not_rotated() {
        let session = session();
        session.set_tokens("a1", Some("r1")).unwrap();
        session.set_tokens("a2", None).unwrap();
        assert_eq!(session.token().as_deref(), Some("a2"));
        assert_eq!(session.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn user_profile_round_trips() {
        let session = session();
        assert!(session.user().unwrap().is_none());
        session.set_user(&profile()).unwrap();
        assert_eq!(session.user().unwrap(), Some(profile()));
    }

    #[test]
    fn corrupt_profile_is_reported() {
        let session = session();
        session.store().set(StorageKey::User, "{").unwrap();
        assert!(matches!(session.user(), Err(AuthError::ProfileDecode(_))));
    }

    #[test]
    fn invalidate_clears_everything() {
        let session = session();
        session.set_tokens("a", Some("r")).unwrap();
        session.set_user(&profile()).unwrap();
        assert!(session.is_authenticated());

        session.invalidate().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
        assert!(session.user().unwrap().is_none());
    }

    #[test]
    fn clones_share_the_store() {
        let a = session();
        let b = a.clone();
        a.set_token("shared").unwrap();
        assert_eq!(b.token().as_deref(), Some("shared"));
    }

    #[test]
    fn opaque_token_has_no_claims() {
        let session = session();
        session.set_token("opaque").unwrap();
        assert!(session.claims().is_none());
    }
}

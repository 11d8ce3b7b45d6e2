//! # manabi-auth
//!
//! Credential handling for the Manabi client.
//!
//! Persists the access token, refresh token and user profile behind the
//! [`CredentialStore`] trait (OS keychain, JSON file, or memory), exposes a
//! typed [`Session`] facade over it, and decodes token expiry for status
//! display. Every read goes to the store; nothing is cached in between.

pub mod claims;
pub mod error;
pub mod session;
pub mod token_store;

pub use claims::TokenClaims;
pub use error::AuthError;
pub use session::Session;
pub use token_store::{CredentialStore, FileStore, KeyringStore, MemoryStore, StorageKey};

//! # manabi-client
//!
//! Authenticated REST client for the Manabi backends.
//!
//! [`ApiClient`] attaches the stored bearer token to every non-public
//! request and, on a 401, refreshes the credential once and re-sends the
//! request. When the refresh fails the stored credentials are cleared and
//! the caller gets [`ApiError::SessionExpired`]. [`Backends`] wires the main
//! API and AI tutor clients over one shared session, and the
//! [`services`] module groups the endpoint calls by feature.

pub mod backends;
pub mod client;
pub mod error;
pub mod http;
pub mod paths;
pub mod refresh;
pub mod services;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backends::Backends;
pub use client::{ApiClient, ClientBuilder, SessionExpiredHook};
pub use error::{ApiError, ErrorKind};
pub use http::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
pub use paths::PublicPaths;
pub use refresh::{HttpTokenRefresher, RefreshedTokens, TokenRefresher, refresh_fn};

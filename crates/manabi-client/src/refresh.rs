//! Credential refresh routine.
//!
//! The refresher exchanges the stored refresh token for a new access token.
//! It talks to the transport directly: the refresh endpoint is public, and
//! routing it through the retrying client could recurse on its own 401.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use manabi_auth::Session;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{ApiRequest, Transport, error_from_response};
use crate::paths::REFRESH_PATH;

/// Tokens returned by a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedTokens {
    pub access_token: String,
    /// Rotated refresh token, when the backend issues one.
    pub refresh_token: Option<String>,
}

impl RefreshedTokens {
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
        }
    }
}

pub trait TokenRefresher: Send + Sync {
    /// Obtain a fresh access token. Persisting it is the caller's job.
    fn refresh(&self) -> BoxFuture<'_, Result<RefreshedTokens, ApiError>>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(rename = "accessToken", alias = "access_token", alias = "token")]
    access_token: String,
    #[serde(default, rename = "refreshToken", alias = "refresh_token")]
    refresh_token: Option<String>,
}

/// Refreshes against the backend's `/auth/refresh-token` endpoint.
pub struct HttpTokenRefresher {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl HttpTokenRefresher {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            transport,
            session,
        }
    }

    async fn exchange(&self) -> Result<RefreshedTokens, ApiError> {
        let Some(refresh_token) = self.session.refresh_token() else {
            return Err(ApiError::Unauthorized {
                message: "No refresh token is stored. Please sign in again.".into(),
            });
        };

        let request = ApiRequest::post(REFRESH_PATH).with_json(&RefreshRequest {
            refresh_token: &refresh_token,
        })?;
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(error_from_response(&response));
        }

        let body: RefreshResponse = response.json()?;
        if body.access_token.trim().is_empty() {
            return Err(ApiError::Decode("refresh response carried an empty token".into()));
        }
        Ok(RefreshedTokens {
            access_token: body.access_token,
            refresh_token: body.refresh_token.filter(|t| !t.is_empty()),
        })
    }
}

impl TokenRefresher for HttpTokenRefresher {
    fn refresh(&self) -> BoxFuture<'_, Result<RefreshedTokens, ApiError>> {
        Box::pin(self.exchange())
    }
}

/// Refresher backed by an async closure.
pub struct FnRefresher<F> {
    refresh: F,
}

/// Wrap an async closure as a [`TokenRefresher`].
pub const fn refresh_fn<F, Fut>(refresh: F) -> FnRefresher<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<RefreshedTokens, ApiError>> + Send + 'static,
{
    FnRefresher { refresh }
}

impl<F, Fut> TokenRefresher for FnRefresher<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<RefreshedTokens, ApiError>> + Send + 'static,
{
    fn refresh(&self) -> BoxFuture<'_, Result<RefreshedTokens, ApiError>> {
        Box::pin((self.refresh)())
    }
}

#[cfg(test)]
mod tests {
    use manabi_auth::MemoryStore;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::testing::ScriptedTransport;

    fn setup() -> (Arc<ScriptedTransport>, Session, HttpTokenRefresher) {
        let transport = Arc::new(ScriptedTransport::new());
        let session = Session::new(Arc::new(MemoryStore::new()));
        let refresher = HttpTokenRefresher::new(transport.clone(), session.clone());
        (transport, session, refresher)
    }

    #[tokio::test]
    async fn exchanges_refresh_token_without_bearer_header() {
        let (transport, session, refresher) = setup();
        session.set_tokens("old-access", Some("refresh-1")).unwrap();
        transport.push_json(StatusCode::OK, json!({"accessToken": "new-access", "refreshToken": "refresh-2"}));

        let tokens = refresher.refresh().await.unwrap();
        assert_eq!(
            tokens,
            RefreshedTokens {
                access_token: "new-access".into(),
                refresh_token: Some("refresh-2".into()),
            }
        );

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].path, "/auth/refresh-token");
        assert_eq!(sent[0].body, Some(json!({"refreshToken": "refresh-1"})));
        assert!(sent[0].bearer_token().is_none());
    }

    #[tokio::test]
    async fn accepts_alternate_token_field_names() {
        let (transport, session, refresher) = setup();
        session.set_tokens("a", Some("r")).unwrap();
        transport.push_json(StatusCode::OK, json!({"token": "t2"}));

        let tokens = refresher.refresh().await.unwrap();
        assert_eq!(tokens, RefreshedTokens::new("t2"));
    }

    #[tokio::test]
    async fn missing_refresh_token_fails_without_network() {
        let (transport, _session, refresher) = setup();
        let err = refresher.refresh().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn rejected_refresh_surfaces_backend_message() {
        let (transport, session, refresher) = setup();
        session.set_tokens("a", Some("revoked")).unwrap();
        transport.push_json(StatusCode::UNAUTHORIZED, json!({"message": "Refresh token revoked"}));

        let err = refresher.refresh().await.unwrap_err();
        assert_eq!(err.message(), "Refresh token revoked");
    }

    #[tokio::test]
    async fn closure_refresher_delegates() {
        let refresher = refresh_fn(|| async { Ok(RefreshedTokens::new("from-closure")) });
        assert_eq!(refresher.refresh().await.unwrap().access_token, "from-closure");
    }
}

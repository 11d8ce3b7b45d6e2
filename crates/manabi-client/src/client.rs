//! Authenticated client with single-retry token refresh.
//!
//! Per request:
//!
//! 1. Unless the path is public, attach `Authorization: Bearer <token>`
//!    using the token read from the credential store at dispatch time.
//! 2. A non-401 response is terminal: 2xx is returned, anything else is
//!    normalized into an [`ApiError`].
//! 3. A 401 on a protected, non-auth path that has not been retried yet
//!    runs the refresh routine once. On success the new token is persisted
//!    and the request is re-dispatched with it; on failure the session is
//!    invalidated and [`ApiError::SessionExpired`] is returned.
//! 4. Any other 401 is terminal.
//!
//! The retry flag is per request, so one request triggers at most one
//! refresh no matter what the retried dispatch returns.

use std::sync::Arc;
use std::time::Duration;

use manabi_auth::{MemoryStore, Session};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse, ReqwestTransport, Transport, error_from_response};
use crate::paths::{PublicPaths, is_auth_endpoint};
use crate::refresh::{HttpTokenRefresher, TokenRefresher};

/// Callback run after a failed refresh has cleared the stored credentials.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for one backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    base_url: String,
    transport: Arc<dyn Transport>,
    refresher: Arc<dyn TokenRefresher>,
    session: Session,
    public_paths: PublicPaths,
    on_session_expired: Option<SessionExpiredHook>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("name", &self.inner.name)
            .field("base_url", &self.inner.base_url)
            .field("public_paths", &self.inner.public_paths)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`]; the single factory both backends are made from.
pub struct ClientBuilder {
    name: String,
    base_url: String,
    public_paths: PublicPaths,
    transport: Option<Arc<dyn Transport>>,
    refresher: Option<Arc<dyn TokenRefresher>>,
    session: Option<Session>,
    on_session_expired: Option<SessionExpiredHook>,
    timeout: Duration,
    user_agent: String,
}

impl ClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            name: "api".to_string(),
            base_url: base_url.into(),
            public_paths: PublicPaths::default(),
            transport: None,
            refresher: None,
            session: None,
            on_session_expired: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("manabi/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Label used in log events.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn public_paths(mut self, public_paths: PublicPaths) -> Self {
        self.public_paths = public_paths;
        self
    }

    /// Replace the HTTP transport (defaults to [`ReqwestTransport`]).
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the refresh routine (defaults to [`HttpTokenRefresher`] over
    /// this client's transport).
    #[must_use]
    pub fn refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Credential session (defaults to an in-memory store).
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn on_session_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if no transport was supplied and the
    /// base URL does not parse.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                &self.base_url,
                self.timeout,
                &self.user_agent,
            )?),
        };
        let session = self
            .session
            .unwrap_or_else(|| Session::new(Arc::new(MemoryStore::new())));
        let refresher = self.refresher.unwrap_or_else(|| {
            Arc::new(HttpTokenRefresher::new(transport.clone(), session.clone()))
        });

        Ok(ApiClient {
            inner: Arc::new(Inner {
                name: self.name,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                transport,
                refresher,
                session,
                public_paths: self.public_paths,
                on_session_expired: self.on_session_expired,
            }),
        })
    }
}

impl ApiClient {
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    #[must_use]
    pub fn public_paths(&self) -> &PublicPaths {
        &self.inner.public_paths
    }

    /// Send a request, refreshing the credential at most once on a 401.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for transport failures, non-2xx
    /// responses, and authentication failures that survive the single retry.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let inner = &*self.inner;
        let public = inner.public_paths.is_public(&request.path);
        let auth_endpoint = is_auth_endpoint(&request.path);
        let mut retried = false;
        let mut refreshed_token: Option<String> = None;

        loop {
            let outgoing = self.authorize(request.clone(), public, refreshed_token.take())?;
            tracing::debug!(
                client = %inner.name,
                method = %outgoing.method,
                path = %outgoing.path,
                authenticated = outgoing.headers.contains_key(AUTHORIZATION),
                retried,
                "dispatching request"
            );

            let response = match inner.transport.send(outgoing).await {
                Ok(response) => response,
                Err(error) => {
                    tracing::debug!(client = %inner.name, path = %request.path, %error, "no response");
                    return Err(error);
                }
            };
            tracing::debug!(
                client = %inner.name,
                path = %request.path,
                status = response.status.as_u16(),
                "response received"
            );

            if response.status != StatusCode::UNAUTHORIZED {
                return if response.is_success() {
                    Ok(response)
                } else {
                    Err(error_from_response(&response))
                };
            }

            if retried || public || auth_endpoint {
                return Err(error_from_response(&response));
            }

            tracing::info!(client = %inner.name, path = %request.path, "credential rejected; refreshing");
            match inner.refresher.refresh().await {
                Ok(tokens) => {
                    if let Err(error) = inner
                        .session
                        .set_tokens(&tokens.access_token, tokens.refresh_token.as_deref())
                    {
                        tracing::warn!(%error, "failed to persist refreshed credential");
                    }
                    refreshed_token = Some(tokens.access_token);
                    retried = true;
                }
                Err(error) => {
                    tracing::warn!(client = %inner.name, %error, "credential refresh failed; ending session");
                    self.invalidate_session();
                    return Err(ApiError::session_expired());
                }
            }
        }
    }

    /// Clear stored credentials and run the session-expired hook.
    pub fn invalidate_session(&self) {
        if let Err(error) = self.inner.session.invalidate() {
            tracing::warn!(%error, "failed to clear stored credentials");
        }
        if let Some(hook) = &self.inner.on_session_expired {
            hook();
        }
    }

    fn authorize(
        &self,
        mut request: ApiRequest,
        public: bool,
        token_override: Option<String>,
    ) -> Result<ApiRequest, ApiError> {
        if public {
            return Ok(request);
        }
        let Some(token) = token_override.or_else(|| self.inner.session.token()) else {
            return Ok(request);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ApiError::Unauthorized {
                message: "The stored credential is malformed. Please sign in again.".into(),
            }
        })?;
        value.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, value);
        Ok(request)
    }

    // --- JSON conveniences ---

    /// # Errors
    ///
    /// See [`Self::execute`]; also [`ApiError::Decode`] for a mismatched body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::get(path)).await?.json()
    }

    /// # Errors
    ///
    /// See [`Self::get_json`].
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, ApiError> {
        self.execute(ApiRequest::get(path).with_query_pairs(query))
            .await?
            .json()
    }

    /// # Errors
    ///
    /// See [`Self::get_json`]; also [`ApiError::Encode`] for an unserializable body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(ApiRequest::post(path).with_json(body)?)
            .await?
            .json()
    }

    /// POST with a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.execute(ApiRequest::post(path).with_json(body)?)
            .await
            .map(drop)
    }

    /// POST without a body.
    ///
    /// # Errors
    ///
    /// See [`Self::get_json`].
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::post(path)).await?.json()
    }

    /// # Errors
    ///
    /// See [`Self::post_json`].
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(ApiRequest::put(path).with_json(body)?)
            .await?
            .json()
    }

    /// # Errors
    ///
    /// See [`Self::post_json`].
    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(ApiRequest::patch(path).with_json(body)?)
            .await?
            .json()
    }

    /// # Errors
    ///
    /// See [`Self::execute`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(path)).await.map(drop)
    }
}

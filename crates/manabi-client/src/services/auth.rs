use manabi_core::entities::UserProfile;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Acknowledgement body returned by account endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    #[serde(rename = "accessToken", alias = "access_token", alias = "token")]
    pub access_token: String,
    #[serde(default, rename = "refreshToken", alias = "refresh_token")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Account lifecycle: registration, login, verification, password reset.
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.client.post_json("/auth/register", request).await
    }

    /// Log in and persist the returned tokens and profile.
    ///
    /// When the login response carries no profile, `/users/me` is fetched.
    /// If that fetch fails the new tokens are discarded again, so a failed
    /// login never leaves a half-authenticated session behind.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails (a 401 surfaces directly,
    /// without a refresh attempt).
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let mut response: LoginResponse = self
            .client
            .post_json("/auth/login", &json!({"email": email, "password": password}))
            .await?;

        let session = self.client.session();
        session
            .set_tokens(&response.access_token, response.refresh_token.as_deref())?;

        if let Some(user) = &response.user {
            session.set_user(user)?;
        } else {
            match self.me().await {
                Ok(user) => response.user = Some(user),
                Err(error) => {
                    if let Err(clear_error) = session.invalidate() {
                        tracing::warn!(%clear_error, "failed to discard tokens after profile fetch failed");
                    }
                    return Err(error);
                }
            }
        }
        tracing::info!(email, "signed in");
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn verify_email(&self, email: &str, otp: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .post_json("/auth/verify-email", &json!({"email": email, "otp": otp}))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn resend_otp(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .post_json("/auth/resend-otp", &json!({"email": email}))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .post_json("/auth/forgot-password", &json!({"email": email}))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        self.client
            .post_json(
                "/auth/reset-password",
                &json!({"email": email, "otp": otp, "newPassword": new_password}),
            )
            .await
    }

    /// Fetch the current user's profile and store it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let user: UserProfile = self.client.get_json("/users/me").await?;
        self.client.session().set_user(&user)?;
        Ok(user)
    }

    /// Revoke the refresh token server-side and clear local credentials.
    ///
    /// Local credentials are cleared even if the server call fails.
    ///
    /// # Errors
    ///
    /// Returns an error only if the local store cannot be cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let session = self.client.session();
        if session.is_authenticated() {
            let body = json!({"refreshToken": session.refresh_token()});
            if let Err(error) = self.client.post_no_content("/auth/logout", &body).await {
                tracing::warn!(%error, "server-side logout failed; clearing local session anyway");
            }
        }
        Ok(session.invalidate()?)
    }
}

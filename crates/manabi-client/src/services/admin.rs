use manabi_core::entities::{AdminUser, Page, Role};
use serde_json::json;

use super::Query;
use crate::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub search: Option<String>,
    pub role: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// User administration. The backend rejects these calls with 403 for
/// non-admin accounts; no client-side role check is made.
pub struct AdminService<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_users(&self, query: &UserQuery) -> Result<Page<AdminUser>, ApiError> {
        let pairs = Query::default()
            .opt("search", query.search.as_deref())
            .opt("role", query.role.as_deref())
            .opt("page", query.page)
            .opt("size", query.size)
            .into_pairs();
        self.client.get_json_with_query("/admin/users", pairs).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_user(&self, id: i64) -> Result<AdminUser, ApiError> {
        self.client.get_json(&format!("/admin/users/{id}")).await
    }

    /// Replace the user's roles.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update_roles(&self, id: i64, roles: &[String]) -> Result<AdminUser, ApiError> {
        self.client
            .put_json(&format!("/admin/users/{id}/roles"), &json!({"roles": roles}))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn set_active(&self, id: i64, active: bool) -> Result<AdminUser, ApiError> {
        self.client
            .patch_json(&format!("/admin/users/{id}/status"), &json!({"active": active}))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/admin/users/{id}")).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.client.get_json("/admin/roles").await
    }
}

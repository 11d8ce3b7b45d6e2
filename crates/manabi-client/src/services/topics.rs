use manabi_core::entities::Topic;

use crate::ApiClient;
use crate::error::ApiError;

/// Forum topics (categories).
pub struct TopicService<'a> {
    client: &'a ApiClient,
}

impl<'a> TopicService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self) -> Result<Vec<Topic>, ApiError> {
        self.client.get_json("/topics").await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get(&self, id: i64) -> Result<Topic, ApiError> {
        self.client.get_json(&format!("/topics/{id}")).await
    }
}

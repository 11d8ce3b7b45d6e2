use manabi_core::entities::Roadmap;

use super::Query;
use crate::ApiClient;
use crate::error::ApiError;

pub struct RoadmapService<'a> {
    client: &'a ApiClient,
}

impl<'a> RoadmapService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, level: Option<&str>) -> Result<Vec<Roadmap>, ApiError> {
        let pairs = Query::default().opt("level", level).into_pairs();
        self.client.get_json_with_query("/roadmaps", pairs).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get(&self, id: i64) -> Result<Roadmap, ApiError> {
        self.client.get_json(&format!("/roadmaps/{id}")).await
    }
}

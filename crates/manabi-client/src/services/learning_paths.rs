use manabi_core::entities::LearningPath;
use serde::Serialize;
use serde_json::json;

use crate::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLearningPath {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Learning paths: user-curated ordered lists of courses.
pub struct LearningPathService<'a> {
    client: &'a ApiClient,
}

impl<'a> LearningPathService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self) -> Result<Vec<LearningPath>, ApiError> {
        self.client.get_json("/learning-paths").await
    }

    /// The path with its courses sorted by position.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get(&self, id: i64) -> Result<LearningPath, ApiError> {
        let mut path: LearningPath = self
            .client
            .get_json(&format!("/learning-paths/{id}"))
            .await?;
        path.courses.sort_by_key(|c| c.position);
        Ok(path)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create(&self, path: &NewLearningPath) -> Result<LearningPath, ApiError> {
        self.client.post_json("/learning-paths", path).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update(&self, id: i64, path: &NewLearningPath) -> Result<LearningPath, ApiError> {
        self.client
            .put_json(&format!("/learning-paths/{id}"), path)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/learning-paths/{id}")).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn add_course(&self, path_id: i64, course_id: i64) -> Result<LearningPath, ApiError> {
        self.client
            .post_json(
                &format!("/learning-paths/{path_id}/courses"),
                &json!({"courseId": course_id}),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn remove_course(&self, path_id: i64, course_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/learning-paths/{path_id}/courses/{course_id}"))
            .await
    }

    /// Persist a new course order. `course_ids` must list every course on
    /// the path exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn reorder_courses(
        &self,
        path_id: i64,
        course_ids: &[i64],
    ) -> Result<LearningPath, ApiError> {
        self.client
            .put_json(
                &format!("/learning-paths/{path_id}/courses/order"),
                &json!({"courseIds": course_ids}),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::services::test_support::client;

    #[tokio::test]
    async fn get_sorts_courses_by_position() {
        let (transport, client) = client();
        transport.push_json(
            StatusCode::OK,
            json!({"id": 1, "title": "JLPT N4", "courses": [
                {"courseId": 8, "title": "Kanji", "position": 2},
                {"courseId": 5, "title": "Grammar", "position": 1},
            ]}),
        );

        let path = LearningPathService::new(&client).get(1).await.unwrap();
        assert_eq!(path.course_order(), vec![5, 8]);
    }

    #[tokio::test]
    async fn reorder_sends_full_order() {
        let (transport, client) = client();
        transport.push_json(StatusCode::OK, json!({"id": 1, "title": "JLPT N4"}));

        LearningPathService::new(&client)
            .reorder_courses(1, &[8, 5])
            .await
            .unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.path, "/learning-paths/1/courses/order");
        assert_eq!(sent.body, Some(json!({"courseIds": [8, 5]})));
    }
}

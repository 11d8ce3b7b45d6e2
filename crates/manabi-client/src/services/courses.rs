use manabi_core::entities::{Chapter, Course, Page, Unit};
use manabi_core::ordering::order_units;

use super::Query;
use crate::ApiClient;
use crate::error::ApiError;

/// Filters for the course catalogue.
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
    pub search: Option<String>,
    pub level: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

pub struct CourseService<'a> {
    client: &'a ApiClient,
}

impl<'a> CourseService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, query: &CourseQuery) -> Result<Page<Course>, ApiError> {
        let pairs = Query::default()
            .opt("search", query.search.as_deref())
            .opt("level", query.level.as_deref())
            .opt("page", query.page)
            .opt("size", query.size)
            .into_pairs();
        self.client.get_json_with_query("/courses", pairs).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get(&self, id: i64) -> Result<Course, ApiError> {
        self.client.get_json(&format!("/courses/{id}")).await
    }

    /// Chapters of a course, sorted by position.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn chapters(&self, course_id: i64) -> Result<Vec<Chapter>, ApiError> {
        let mut chapters: Vec<Chapter> = self
            .client
            .get_json(&format!("/courses/{course_id}/chapters"))
            .await?;
        chapters.sort_by_key(|c| (c.position, c.id));
        Ok(chapters)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn chapter(&self, id: i64) -> Result<Chapter, ApiError> {
        self.client.get_json(&format!("/chapters/{id}")).await
    }

    /// Units of a chapter in study order: every unit follows its
    /// prerequisite, ties broken by position.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, or [`ApiError::Decode`]
    /// if the prerequisite graph is inconsistent.
    pub async fn units(&self, chapter_id: i64) -> Result<Vec<Unit>, ApiError> {
        let units: Vec<Unit> = self
            .client
            .get_json(&format!("/chapters/{chapter_id}/units"))
            .await?;
        order_units(&units).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn unit(&self, id: i64) -> Result<Unit, ApiError> {
        self.client.get_json(&format!("/units/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::services::test_support::{client, query_value};

    #[tokio::test]
    async fn list_sends_only_present_filters() {
        let (transport, client) = client();
        transport.push_json(
            StatusCode::OK,
            json!({"content": [{"id": 1, "title": "N5 Grammar"}], "totalElements": 1, "number": 0, "size": 20}),
        );

        let page = CourseService::new(&client)
            .list(&CourseQuery {
                level: Some("N5".into()),
                page: Some(0),
                ..CourseQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "N5 Grammar");

        assert_eq!(query_value(&transport, 0, "level").as_deref(), Some("N5"));
        assert_eq!(query_value(&transport, 0, "page").as_deref(), Some("0"));
        assert_eq!(query_value(&transport, 0, "search"), None);
    }

    #[tokio::test]
    async fn units_come_back_in_study_order() {
        let (transport, client) = client();
        transport.push_json(
            StatusCode::OK,
            json!([
                {"id": 11, "chapterId": 3, "title": "Quiz", "position": 1, "prerequisiteId": 12},
                {"id": 12, "chapterId": 3, "title": "Lesson", "position": 2},
            ]),
        );

        let units = CourseService::new(&client).units(3).await.unwrap();
        assert_eq!(units.iter().map(|u| u.id).collect::<Vec<_>>(), vec![12, 11]);
        assert_eq!(transport.requests()[0].path, "/chapters/3/units");
    }

    #[tokio::test]
    async fn cyclic_units_are_a_decode_error() {
        let (transport, client) = client();
        transport.push_json(
            StatusCode::OK,
            json!([
                {"id": 1, "chapterId": 3, "title": "A", "position": 1, "prerequisiteId": 2},
                {"id": 2, "chapterId": 3, "title": "B", "position": 2, "prerequisiteId": 1},
            ]),
        );

        let err = CourseService::new(&client).units(3).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_course_maps_status_and_message() {
        let (transport, client) = client();
        transport.push_json(StatusCode::NOT_FOUND, json!({"message": "Course not found"}));

        let err = CourseService::new(&client).get(99).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "Course not found");
    }
}

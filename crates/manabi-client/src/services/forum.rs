use manabi_core::entities::{Page, Post};
use serde::{Deserialize, Serialize};

use super::Query;
use crate::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub topic_id: Option<i64>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<i64>,
}

/// Result of toggling a like.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub liked: bool,
    #[serde(default)]
    pub like_count: u64,
}

pub struct ForumService<'a> {
    client: &'a ApiClient,
}

impl<'a> ForumService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Page<Post>, ApiError> {
        let pairs = Query::default()
            .opt("topicId", query.topic_id)
            .opt("search", query.search.as_deref())
            .opt("page", query.page)
            .opt("size", query.size)
            .into_pairs();
        self.client.get_json_with_query("/forum/posts", pairs).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        self.client.get_json(&format!("/forum/posts/{id}")).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.client.post_json("/forum/posts", post).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update_post(&self, id: i64, post: &NewPost) -> Result<Post, ApiError> {
        self.client
            .put_json(&format!("/forum/posts/{id}"), post)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/forum/posts/{id}")).await
    }

    /// Toggle the current user's like on a post.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn like_post(&self, id: i64) -> Result<LikeStatus, ApiError> {
        self.client
            .post_empty(&format!("/forum/posts/{id}/like"))
            .await
    }
}

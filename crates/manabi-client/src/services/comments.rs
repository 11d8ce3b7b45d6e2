use manabi_core::entities::Comment;
use serde::Serialize;
use serde_json::json;

use crate::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    /// Set when replying to another comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

pub struct CommentService<'a> {
    client: &'a ApiClient,
}

impl<'a> CommentService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.client
            .get_json(&format!("/forum/posts/{post_id}/comments"))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create(&self, post_id: i64, comment: &NewComment) -> Result<Comment, ApiError> {
        self.client
            .post_json(&format!("/forum/posts/{post_id}/comments"), comment)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update(&self, comment_id: i64, content: &str) -> Result<Comment, ApiError> {
        self.client
            .put_json(
                &format!("/forum/comments/{comment_id}"),
                &json!({"content": content}),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete(&self, comment_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/forum/comments/{comment_id}"))
            .await
    }
}

use manabi_core::entities::{ChatMessage, ChatReply};
use serde::Serialize;

use crate::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
}

/// AI tutor chat. Runs against the tutor backend's client.
pub struct TutorService<'a> {
    client: &'a ApiClient,
}

impl<'a> TutorService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.client.post_json("/chat", request).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn history(&self) -> Result<Vec<ChatMessage>, ApiError> {
        self.client.get_json("/chat/history").await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn clear_history(&self) -> Result<(), ApiError> {
        self.client.delete("/chat/history").await
    }
}

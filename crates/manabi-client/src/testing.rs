//! In-memory [`Transport`] for tests and offline embedding.
//!
//! Responses are served in the order they were queued; every request the
//! transport receives is recorded, headers included.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use futures::future::BoxFuture;
use reqwest::StatusCode;

use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse, Transport};

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<ApiResponse, ApiError>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    pub fn push_json(&self, status: StatusCode, body: serde_json::Value) {
        self.push(Ok(ApiResponse::json_body(status, &body)));
    }

    pub fn push_status(&self, status: StatusCode) {
        self.push(Ok(ApiResponse::new(status, Vec::new())));
    }

    /// Queue a transport-level failure (no response).
    pub fn push_unreachable(&self, message: &str) {
        self.push(Err(ApiError::Transport {
            message: message.to_string(),
        }));
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of requests sent to `path` (exact match).
    #[must_use]
    pub fn count_for(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, ApiError>> {
        let path = request.path.clone();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        Box::pin(async move {
            next.unwrap_or_else(|| {
                Err(ApiError::Transport {
                    message: format!("no scripted response left for {path}"),
                })
            })
        })
    }
}

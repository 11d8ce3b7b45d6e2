//! Feature services: named sets of endpoint calls over an [`ApiClient`].
//!
//! Services hold no state of their own and never retry; the only recovery
//! is the client's single credential refresh.
//!
//! [`ApiClient`]: crate::ApiClient

mod admin;
mod auth;
mod comments;
mod courses;
mod forum;
mod learning_paths;
mod roadmaps;
mod topics;
mod tutor;

pub use admin::{AdminService, UserQuery};
pub use auth::{AuthService, LoginResponse, MessageResponse, RegisterRequest};
pub use comments::{CommentService, NewComment};
pub use courses::{CourseQuery, CourseService};
pub use forum::{ForumService, LikeStatus, NewPost, PostQuery};
pub use learning_paths::{LearningPathService, NewLearningPath};
pub use roadmaps::RoadmapService;
pub use topics::TopicService;
pub use tutor::{ChatRequest, TutorService};

/// Collects optional query parameters, skipping `None`s.
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(&'static str, String)>);

impl Query {
    pub(crate) fn opt<T: ToString>(mut self, key: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.0
    }
}

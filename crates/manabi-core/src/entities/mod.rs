//! Entity structs mirrored from the Manabi REST API.
//!
//! All types serialize with `camelCase` field names, matching the wire
//! format. Optional fields default when absent so older backend versions
//! still deserialize.

mod course;
mod forum;
mod learning_path;
mod page;
mod tutor;
mod user;

pub use course::{Chapter, Course, Unit, UnitKind};
pub use forum::{Author, Comment, Post, Topic};
pub use learning_path::{LearningPath, LearningPathCourse, Roadmap, RoadmapStage};
pub use page::Page;
pub use tutor::{ChatMessage, ChatReply, ChatRole};
pub use user::{AdminUser, Role, UserProfile};

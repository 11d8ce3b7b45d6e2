mod admin;
mod auth;
mod course;
mod forum;
mod path;
mod tutor;

pub use admin::AdminCommands;
pub use auth::{AuthCommands, AuthLoginArgs, AuthRegisterArgs};
pub use course::CourseCommands;
pub use forum::ForumCommands;
pub use path::PathCommands;
pub use tutor::TutorCommands;

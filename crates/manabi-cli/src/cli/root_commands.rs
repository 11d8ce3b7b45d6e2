use clap::Subcommand;

use crate::cli::subcommands::{
    AdminCommands, AuthCommands, CourseCommands, ForumCommands, PathCommands, TutorCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out and account management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Browse courses, chapters and units.
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },
    /// Community forum.
    Forum {
        #[command(subcommand)]
        action: ForumCommands,
    },
    /// Learning paths.
    Path {
        #[command(subcommand)]
        action: PathCommands,
    },
    /// User administration (admin accounts only).
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// AI tutor chat.
    Tutor {
        #[command(subcommand)]
        action: TutorCommands,
    },
}

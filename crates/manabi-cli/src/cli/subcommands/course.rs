use clap::Subcommand;

/// Course catalogue commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CourseCommands {
    /// List courses.
    List {
        #[arg(long)]
        search: Option<String>,
        /// JLPT level, e.g. N5.
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Get a course by ID.
    Get { id: i64 },
    /// List a course's chapters.
    Chapters { course_id: i64 },
    /// List a chapter's units in study order.
    Units { chapter_id: i64 },
}

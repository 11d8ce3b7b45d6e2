use clap::Subcommand;

/// AI tutor commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TutorCommands {
    /// Ask the tutor a question.
    Ask {
        #[arg(required = true)]
        message: Vec<String>,
        /// Continue an earlier conversation.
        #[arg(long)]
        conversation: Option<String>,
        /// Course the question is about.
        #[arg(long)]
        course: Option<i64>,
        /// Unit the question is about.
        #[arg(long)]
        unit: Option<i64>,
    },
    /// Show the chat history.
    History,
    /// Delete the chat history.
    Clear,
}

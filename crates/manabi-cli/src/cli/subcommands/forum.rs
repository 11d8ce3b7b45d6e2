use clap::Subcommand;

/// Forum commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ForumCommands {
    /// List posts.
    List {
        #[arg(long)]
        topic: Option<i64>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
    },
    /// List forum topics.
    Topics,
    /// Get a post by ID.
    Get { id: i64 },
    /// Create a post.
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        topic: Option<i64>,
    },
    /// Delete one of your posts.
    Delete { id: i64 },
    /// Toggle your like on a post.
    Like { id: i64 },
    /// List comments on a post.
    Comments { post_id: i64 },
    /// Comment on a post.
    Comment {
        post_id: i64,
        #[arg(long)]
        content: String,
        /// Reply to this comment.
        #[arg(long)]
        reply_to: Option<i64>,
    },
}

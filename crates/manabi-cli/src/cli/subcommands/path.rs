use clap::Subcommand;
use clap::builder::RangedU64ValueParser;

/// Learning path commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PathCommands {
    /// List learning paths.
    List,
    /// Show a learning path with its courses in order.
    Get { id: i64 },
    /// Create a learning path.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Add a course to the end of a path.
    Add { id: i64, course_id: i64 },
    /// Remove a course from a path.
    Remove { id: i64, course_id: i64 },
    /// Move a course within a path (1-based positions).
    Move {
        id: i64,
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        from: usize,
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        to: usize,
    },
    /// List roadmaps.
    Roadmaps {
        #[arg(long)]
        level: Option<String>,
    },
}

pub mod admin;
pub mod auth;
pub mod course;
pub mod forum;
pub mod path;
mod shared;
pub mod tutor;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(&action, ctx, flags).await,
        Commands::Course { action } => course::handle(&action, ctx, flags).await,
        Commands::Forum { action } => forum::handle(&action, ctx, flags).await,
        Commands::Path { action } => path::handle(&action, ctx, flags).await,
        Commands::Admin { action } => admin::handle(&action, ctx, flags).await,
        Commands::Tutor { action } => tutor::handle(&action, ctx, flags).await,
    }
}

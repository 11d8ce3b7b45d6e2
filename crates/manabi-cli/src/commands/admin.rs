use manabi_client::services::UserQuery;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdminCommands;
use crate::output::output;

/// Handle `manabi admin <subcommand>`.
pub async fn handle(
    action: &AdminCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let admin = ctx.backends.admin();
    match action {
        AdminCommands::Users {
            search,
            role,
            page,
            size,
        } => {
            let query = UserQuery {
                search: search.clone(),
                role: role.clone(),
                page: *page,
                size: *size,
            };
            output(&admin.list_users(&query).await?, flags.format)
        }
        AdminCommands::SetRole { id, roles } => {
            output(&admin.update_roles(*id, roles).await?, flags.format)
        }
        AdminCommands::SetActive { id, active } => {
            output(&admin.set_active(*id, *active).await?, flags.format)
        }
        AdminCommands::Roles => output(&admin.list_roles().await?, flags.format),
    }
}

use clap::Subcommand;

/// User administration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// List users.
    Users {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Replace a user's roles.
    SetRole {
        id: i64,
        /// Role names, e.g. ROLE_USER ROLE_ADMIN.
        #[arg(required = true)]
        roles: Vec<String>,
    },
    /// Enable or disable an account.
    SetActive {
        id: i64,
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
    /// List available roles.
    Roles,
}

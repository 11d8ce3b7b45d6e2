use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// Revoke the session and clear stored credentials.
    Logout,
    /// Show who is signed in and when the token expires.
    Status,
    /// Create an account.
    Register(AuthRegisterArgs),
    /// Confirm an email address with the emailed one-time code.
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
    /// Send a new verification code.
    ResendOtp {
        #[arg(long)]
        email: String,
    },
    /// Request a password-reset code.
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password using a reset code.
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
        /// New password (prompted on stdin when omitted).
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Password (prompted on stdin when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub full_name: Option<String>,
    /// Password (prompted on stdin when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

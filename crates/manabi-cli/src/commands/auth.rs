use manabi_auth::TokenClaims;
use manabi_client::services::RegisterRequest;
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AuthCommands, AuthLoginArgs, AuthRegisterArgs};
use crate::commands::shared::secret_or_prompt;
use crate::output::output;

/// Seconds before expiry at which `status` flags the token.
const EXPIRY_WARNING_SECS: i64 = 300;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: Option<i64>,
    username: Option<String>,
    email: Option<String>,
    roles: Vec<String>,
    expires_at: Option<String>,
}

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<String>,
    email: Option<String>,
    roles: Vec<String>,
    expires_at: Option<String>,
    expiring_soon: bool,
    token_store: &'static str,
    api: String,
    tutor_api: String,
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

#[derive(Serialize)]
struct MessageOutput {
    ok: bool,
    message: Option<String>,
}

/// Handle `manabi auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let auth = ctx.backends.auth();
    match action {
        AuthCommands::Login(args) => login(args, ctx, flags).await,
        AuthCommands::Logout => {
            auth.logout().await?;
            output(&AuthLogoutResponse { cleared: true }, flags.format)
        }
        AuthCommands::Status => status(ctx, flags),
        AuthCommands::Register(args) => register(args, ctx, flags).await,
        AuthCommands::Verify { email, otp } => {
            let response = auth.verify_email(email, otp).await?;
            message(response.message, flags)
        }
        AuthCommands::ResendOtp { email } => {
            let response = auth.resend_otp(email).await?;
            message(response.message, flags)
        }
        AuthCommands::ForgotPassword { email } => {
            let response = auth.forgot_password(email).await?;
            message(response.message, flags)
        }
        AuthCommands::ResetPassword {
            email,
            otp,
            password,
        } => {
            let password = secret_or_prompt(password.as_deref(), "New password")?;
            let response = auth.reset_password(email, otp, &password).await?;
            message(response.message, flags)
        }
    }
}

async fn login(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = secret_or_prompt(args.password.as_deref(), "Password")?;
    let response = ctx.backends.auth().login(&args.email, &password).await?;
    let claims = TokenClaims::decode(&response.access_token).ok();
    let user = response.user;

    output(
        &AuthLoginResponse {
            authenticated: true,
            user_id: user.as_ref().map(|u| u.id),
            username: user.as_ref().map(|u| u.username.clone()),
            email: user.as_ref().map(|u| u.email.clone()),
            roles: user.map(|u| u.roles).unwrap_or_default(),
            expires_at: claims.map(|c| c.expires_at.to_rfc3339()),
        },
        flags.format,
    )
}

async fn register(
    args: &AuthRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = secret_or_prompt(args.password.as_deref(), "Password")?;
    let response = ctx
        .backends
        .auth()
        .register(&RegisterRequest {
            username: args.username.clone(),
            email: args.email.clone(),
            password,
            full_name: args.full_name.clone(),
        })
        .await?;
    message(response.message, flags)
}

/// Offline: reads the local store only.
fn status(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.backends.session();
    let user = match session.user() {
        Ok(user) => user,
        Err(error) => {
            tracing::warn!(%error, "stored profile is unreadable");
            None
        }
    };
    let claims = session.claims();

    output(
        &AuthStatusResponse {
            authenticated: session.is_authenticated(),
            user: user.as_ref().map(|u| u.username.clone()),
            email: user.as_ref().map(|u| u.email.clone()),
            roles: user.map(|u| u.roles).unwrap_or_default(),
            expires_at: claims.as_ref().map(|c| c.expires_at.to_rfc3339()),
            expiring_soon: claims.is_some_and(|c| c.is_near_expiry(EXPIRY_WARNING_SECS)),
            token_store: session.store().backend(),
            api: ctx.backends.api.base_url().to_string(),
            tutor_api: ctx.backends.tutor.base_url().to_string(),
        },
        flags.format,
    )
}

fn message(message: Option<String>, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&MessageOutput { ok: true, message }, flags.format)
}

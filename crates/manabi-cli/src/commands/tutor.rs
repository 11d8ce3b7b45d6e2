use manabi_client::services::ChatRequest;
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::TutorCommands;
use crate::output::output;

#[derive(Serialize)]
struct ClearedResponse {
    cleared: bool,
}

/// Handle `manabi tutor <subcommand>`.
pub async fn handle(
    action: &TutorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let tutor = ctx.backends.tutor();
    match action {
        TutorCommands::Ask {
            message,
            conversation,
            course,
            unit,
        } => {
            let request = ChatRequest {
                message: message.join(" "),
                conversation_id: conversation.clone(),
                course_id: *course,
                unit_id: *unit,
            };
            output(&tutor.send_message(&request).await?, flags.format)
        }
        TutorCommands::History => output(&tutor.history().await?, flags.format),
        TutorCommands::Clear => {
            tutor.clear_history().await?;
            output(&ClearedResponse { cleared: true }, flags.format)
        }
    }
}

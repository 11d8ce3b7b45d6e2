use manabi_client::services::{NewComment, NewPost, PostQuery};
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::ForumCommands;
use crate::output::output;

#[derive(Serialize)]
struct DeletedResponse {
    deleted: i64,
}

/// Handle `manabi forum <subcommand>`.
pub async fn handle(
    action: &ForumCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let forum = ctx.backends.forum();
    match action {
        ForumCommands::List {
            topic,
            search,
            page,
            size,
        } => {
            let query = PostQuery {
                topic_id: *topic,
                search: search.clone(),
                page: *page,
                size: *size,
            };
            output(&forum.list_posts(&query).await?, flags.format)
        }
        ForumCommands::Topics => output(&ctx.backends.topics().list().await?, flags.format),
        ForumCommands::Get { id } => output(&forum.get_post(*id).await?, flags.format),
        ForumCommands::Post {
            title,
            content,
            topic,
        } => {
            let post = NewPost {
                title: title.clone(),
                content: content.clone(),
                topic_id: *topic,
            };
            output(&forum.create_post(&post).await?, flags.format)
        }
        ForumCommands::Delete { id } => {
            forum.delete_post(*id).await?;
            output(&DeletedResponse { deleted: *id }, flags.format)
        }
        ForumCommands::Like { id } => output(&forum.like_post(*id).await?, flags.format),
        ForumCommands::Comments { post_id } => {
            output(&ctx.backends.comments().list(*post_id).await?, flags.format)
        }
        ForumCommands::Comment {
            post_id,
            content,
            reply_to,
        } => {
            let comment = NewComment {
                content: content.clone(),
                parent_id: *reply_to,
            };
            let created = ctx.backends.comments().create(*post_id, &comment).await?;
            output(&created, flags.format)
        }
    }
}

use anyhow::Context;
use manabi_client::services::NewLearningPath;
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::PathCommands;
use crate::output::output;

#[derive(Serialize)]
struct RemovedResponse {
    path_id: i64,
    removed_course: i64,
}

/// Handle `manabi path <subcommand>`.
pub async fn handle(
    action: &PathCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let paths = ctx.backends.learning_paths();
    match action {
        PathCommands::List => output(&paths.list().await?, flags.format),
        PathCommands::Get { id } => {
            let path = paths.get(*id).await?;
            output(&path.courses, flags.format)
        }
        PathCommands::Create { title, description } => {
            let created = paths
                .create(&NewLearningPath {
                    title: title.clone(),
                    description: description.clone(),
                })
                .await?;
            output(&created, flags.format)
        }
        PathCommands::Add { id, course_id } => {
            output(&paths.add_course(*id, *course_id).await?, flags.format)
        }
        PathCommands::Remove { id, course_id } => {
            paths.remove_course(*id, *course_id).await?;
            output(
                &RemovedResponse {
                    path_id: *id,
                    removed_course: *course_id,
                },
                flags.format,
            )
        }
        PathCommands::Move { id, from, to } => {
            let mut path = paths.get(*id).await?;
            path.move_course(from - 1, to - 1)
                .with_context(|| format!("cannot move course {from} to {to}"))?;
            let mut saved = paths.reorder_courses(*id, &path.course_order()).await?;
            saved.courses.sort_by_key(|c| c.position);
            output(&saved.courses, flags.format)
        }
        PathCommands::Roadmaps { level } => {
            let roadmaps = ctx.backends.roadmaps().list(level.as_deref()).await?;
            output(&roadmaps, flags.format)
        }
    }
}

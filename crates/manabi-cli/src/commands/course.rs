use manabi_client::services::CourseQuery;
use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::CourseCommands;
use crate::output::output;

#[derive(Serialize)]
struct UnitRow {
    step: usize,
    id: i64,
    title: String,
    kind: manabi_core::entities::UnitKind,
    requires: Option<i64>,
}

/// Handle `manabi course <subcommand>`.
pub async fn handle(
    action: &CourseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let courses = ctx.backends.courses();
    match action {
        CourseCommands::List {
            search,
            level,
            page,
            size,
        } => {
            let query = CourseQuery {
                search: search.clone(),
                level: level.clone(),
                page: *page,
                size: *size,
            };
            output(&courses.list(&query).await?, flags.format)
        }
        CourseCommands::Get { id } => output(&courses.get(*id).await?, flags.format),
        CourseCommands::Chapters { course_id } => {
            output(&courses.chapters(*course_id).await?, flags.format)
        }
        CourseCommands::Units { chapter_id } => {
            let rows = courses
                .units(*chapter_id)
                .await?
                .into_iter()
                .enumerate()
                .map(|(index, unit)| UnitRow {
                    step: index + 1,
                    id: unit.id,
                    title: unit.title,
                    kind: unit.kind,
                    requires: unit.prerequisite_id,
                })
                .collect::<Vec<_>>();
            output(&rows, flags.format)
        }
    }
}

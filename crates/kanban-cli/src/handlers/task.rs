use crate::cli::{TaskAction, TaskMoveArgs};
use crate::context::CliContext;
use chrono::Utc;
use kanban_core::KanbanError;
use kanban_domain::{new_task, update_patch, Action, ColumnId, Task, TaskDraft, TaskPatch};
use serde_json::{json, Value};

pub fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<Value> {
    match action {
        TaskAction::Add(args) => {
            let draft = TaskDraft::new(args.title)
                .with_description(args.description)
                .with_priority(args.priority);
            let task = new_task(draft, Utc::now())?;
            let id = task.id.clone();
            ctx.dispatch(Action::add_task(task));
            Ok(serde_json::to_value(find(ctx, id.as_str())?)?)
        }
        TaskAction::Update(args) => {
            find(ctx, &args.id)?;
            let patch = TaskPatch {
                title: args.title,
                description: args.description,
                priority: args.priority,
            };
            ctx.dispatch(update_patch(args.id.as_str(), patch, Utc::now())?);
            Ok(serde_json::to_value(find(ctx, &args.id)?)?)
        }
        TaskAction::Delete { id } => {
            find(ctx, &id)?;
            ctx.dispatch(Action::delete_task(id.as_str()));
            Ok(json!({ "deleted": id }))
        }
        TaskAction::Move(args) => move_task(ctx, args),
    }
}

fn move_task(ctx: &mut CliContext, args: TaskMoveArgs) -> anyhow::Result<Value> {
    let task = find(ctx, &args.id)?;
    // A task listed in no column moves out of the column its status names.
    let source = ctx
        .state()
        .snapshot()
        .column_of(&args.id)
        .unwrap_or_else(|| task.status.column());

    let filtering = args.text.is_some() || args.filter_priority.is_some();
    let index = match args.index {
        None => i64::try_from(ctx.state().order()[args.to].len()).unwrap_or(i64::MAX),
        Some(index) if filtering => {
            let projection = ctx.filtered(args.text, args.filter_priority);
            let visible = usize::try_from(index).unwrap_or(0);
            let master = projection.resolve_drop_index(args.to, visible);
            i64::try_from(master).unwrap_or(i64::MAX)
        }
        Some(index) => index,
    };

    ctx.dispatch(Action::move_task(args.id.as_str(), source, args.to, index));

    let position = position_of(ctx, args.to, &args.id);
    Ok(json!({
        "task": find(ctx, &args.id)?,
        "from": source,
        "column": args.to,
        "index": position,
    }))
}

fn find(ctx: &CliContext, id: &str) -> Result<Task, KanbanError> {
    ctx.state()
        .snapshot()
        .task(id)
        .cloned()
        .ok_or_else(|| not_found(id))
}

fn position_of(ctx: &CliContext, column: ColumnId, id: &str) -> Option<usize> {
    ctx.state().order()[column]
        .iter()
        .position(|tid| tid.as_str() == id)
}

fn not_found(id: &str) -> KanbanError {
    KanbanError::NotFound(format!("Task {}", id))
}

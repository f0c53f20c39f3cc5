use crate::cli::ListArgs;
use crate::context::CliContext;
use crate::output::ListResponse;
use chrono::{DateTime, Utc};
use kanban_core::VirtualWindow;
use kanban_domain::{ColumnId, Task};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnView {
    column: ColumnId,
    title: &'static str,
    badge: String,
    total: usize,
    shown: usize,
    window: WindowView,
    tasks: Vec<TaskRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowView {
    start: usize,
    end: Option<usize>,
    spacer_above: usize,
    spacer_below: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskRow {
    #[serde(flatten)]
    task: Task,
    priority_label: &'static str,
    modified: String,
}

impl TaskRow {
    fn new(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            priority_label: task.priority.label(),
            modified: task.modified_label(now),
            task: task.clone(),
        }
    }
}

pub fn handle(ctx: &mut CliContext, args: ListArgs) -> anyhow::Result<Value> {
    let projection = ctx.filtered(args.text, args.priority);
    let state = ctx.state().clone();
    let config = &ctx.config;
    let window = VirtualWindow::new(config.row_height, args.window.unwrap_or(config.window_size))
        .with_overscan(config.overscan);
    let now = Utc::now();

    let columns: Vec<ColumnId> = match args.column {
        Some(column) => vec![column],
        None => ColumnId::ALL.to_vec(),
    };

    let views = columns
        .into_iter()
        .map(|column| {
            let visible = projection.visible(column);
            let slice = window.compute(visible.len(), args.scroll);
            let tasks = slice
                .slice(visible)
                .iter()
                .filter_map(|id| state.snapshot().task(id.as_str()))
                .map(|task| TaskRow::new(task, now))
                .collect();

            ColumnView {
                column,
                title: column.title(),
                badge: projection.badge(column),
                total: state.order()[column].len(),
                shown: visible.len(),
                window: WindowView {
                    start: slice.start(),
                    end: slice.end(),
                    spacer_above: slice.spacer_above,
                    spacer_below: slice.spacer_below,
                },
                tasks,
            }
        })
        .collect();

    Ok(serde_json::to_value(ListResponse::new(views))?)
}

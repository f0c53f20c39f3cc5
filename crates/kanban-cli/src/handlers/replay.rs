use crate::context::CliContext;
use anyhow::Context;
use kanban_core::Frozen;
use kanban_domain::Action;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Apply one JSON-encoded action per line, e.g.
/// `{"type":"MOVE_TASK","payload":{"taskId":"t1","sourceColumn":"todo","targetColumn":"done","targetIndex":0}}`.
/// Blank lines are skipped. The first undecodable line aborts the replay.
pub async fn handle<R>(ctx: &mut CliContext, input: R) -> anyhow::Result<Value>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut applied = 0usize;
    let mut changed = 0usize;
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let action: Action = serde_json::from_str(line)
            .with_context(|| format!("Invalid action on line {}", line_no))?;
        tracing::debug!("Replaying {} from line {}", action.kind(), line_no);

        let before = ctx.state().clone();
        let after = ctx.dispatch(action);
        applied += 1;
        if !Frozen::ptr_eq(&before, after) {
            changed += 1;
        }
    }

    let state = ctx.state();
    Ok(json!({
        "applied": applied,
        "changed": changed,
        "tasks": state.tasks().len(),
        "canUndo": state.can_undo(),
        "canRedo": state.can_redo(),
        "historySize": state.history_size(),
    }))
}

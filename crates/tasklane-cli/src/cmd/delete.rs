use super::open_workspace;
use crate::output::{OutputMode, fail, render};
use clap::Args;
use serde_json::json;
use std::path::Path;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Task ID to delete.
    pub id: String,
}

pub fn run_delete(args: &DeleteArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let mut ws = open_workspace(project_root, output)?;
    let task = ws
        .engine
        .delete_task(&mut ws.conn, &args.id)
        .map_err(|e| fail(output, e))?;

    let value = json!({
        "ok": true,
        "task_id": task.id,
        "project_id": task.project_id,
    });
    render(output, &value, |_, _, w| writeln!(w, "Deleted {}", task.id))
}

//! `tl move`: reposition a task, optionally into another status column.

use super::{open_workspace, parse_status_opt};
use crate::output::{OutputMode, fail, pretty_kv, render};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Task ID to move.
    pub id: String,

    /// Zero-based target offset. Offset 0 is the head of the status column.
    #[arg(long)]
    pub to: u32,

    /// Target status column. Defaults to the task's current status.
    #[arg(long)]
    pub status: Option<String>,
}

pub fn run_move(args: &MoveArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let status = parse_status_opt(args.status.as_deref(), output)?;
    let mut ws = open_workspace(project_root, output)?;

    let outcome = ws
        .engine
        .move_task(&mut ws.conn, &args.id, status, args.to)
        .map_err(|e| fail(output, e))?;

    render(output, &outcome, |o, mode, w| {
        if mode.is_pretty() {
            pretty_kv(w, "task", &o.task_id)?;
            pretty_kv(w, "status", format!("{} -> {}", o.from_status, o.to_status))?;
            pretty_kv(w, "rank", format!("{} -> {}", o.from_rank, o.to_rank))?;
            pretty_kv(w, "placement", format!("{:?}", o.placement))
        } else {
            writeln!(w, "{}  {}  {}", o.task_id, o.to_status, o.to_rank)
        }
    })
}

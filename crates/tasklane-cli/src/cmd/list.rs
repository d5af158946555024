use super::{open_workspace, parse_status_opt, write_task_row};
use crate::output::{OutputMode, fail, pretty_section, render};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project whose board to list.
    #[arg(long)]
    pub project: String,

    /// Only list one status column.
    #[arg(long)]
    pub status: Option<String>,
}

pub fn run_list(args: &ListArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let status = parse_status_opt(args.status.as_deref(), output)?;
    let ws = open_workspace(project_root, output)?;
    let tasks = ws
        .engine
        .list_tasks(&ws.conn, &args.project, status)
        .map_err(|e| fail(output, e))?;

    render(output, &tasks, |tasks, mode, w| {
        if mode.is_pretty() {
            let heading = status.map_or_else(
                || format!("{} ({} tasks)", args.project, tasks.len()),
                |s| format!("{} / {s} ({} tasks)", args.project, tasks.len()),
            );
            pretty_section(w, &heading)?;
        }
        for task in tasks {
            write_task_row(w, task)?;
        }
        Ok(())
    })
}

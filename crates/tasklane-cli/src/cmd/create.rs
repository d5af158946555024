use super::{open_workspace, parse_status};
use crate::output::{OutputMode, fail, render};
use clap::Args;
use std::path::Path;
use tasklane_core::NewTask;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project to append the task to.
    #[arg(long)]
    pub project: String,

    /// Task title.
    #[arg(long)]
    pub title: String,

    /// Status column (todo, in_progress, done).
    #[arg(long, default_value = "todo")]
    pub status: String,

    /// Optional longer description.
    #[arg(long)]
    pub description: Option<String>,
}

pub fn run_create(args: &CreateArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    if args.title.trim().is_empty() {
        anyhow::bail!("task title must not be empty");
    }

    let status = parse_status(&args.status, output)?;
    let mut ws = open_workspace(project_root, output)?;
    let mut new_task = NewTask::new(&args.project, args.title.trim()).with_status(status);
    if let Some(description) = &args.description {
        new_task = new_task.with_description(description);
    }

    let task = ws
        .engine
        .create_task(&mut ws.conn, &new_task)
        .map_err(|e| fail(output, e))?;

    render(output, &task, |t, _, w| {
        writeln!(w, "Created {} in {} ({}, rank {})", t.id, t.project_id, t.status, t.rank)
    })
}

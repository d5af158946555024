use super::{format_us, open_workspace};
use crate::output::{OutputMode, fail, pretty_kv, render};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Task ID to show.
    pub id: String,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ws = open_workspace(project_root, output)?;
    let task = ws
        .engine
        .get_task(&ws.conn, &args.id)
        .map_err(|e| fail(output, e))?;

    render(output, &task, |t, _, w| {
        pretty_kv(w, "id", &t.id)?;
        pretty_kv(w, "title", &t.title)?;
        pretty_kv(w, "project", &t.project_id)?;
        pretty_kv(w, "status", t.status.as_str())?;
        pretty_kv(w, "rank", t.rank.to_string())?;
        if let Some(description) = &t.description {
            pretty_kv(w, "description", description)?;
        }
        pretty_kv(w, "created", format_us(t.created_at_us))?;
        pretty_kv(w, "updated", format_us(t.updated_at_us))
    })
}

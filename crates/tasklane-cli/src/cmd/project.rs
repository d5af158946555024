//! `tl project`: create and list the projects tasks are ordered within.

use super::{format_us, open_workspace};
use crate::output::{OutputMode, fail, pretty_section, render};
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a new, empty project.
    Create(ProjectCreateArgs),
    /// List all projects, oldest first.
    List,
}

#[derive(Args, Debug)]
pub struct ProjectCreateArgs {
    /// Project name.
    pub name: String,
}

pub fn run_project(command: &ProjectCommand, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ws = open_workspace(project_root, output)?;

    match command {
        ProjectCommand::Create(args) => {
            if args.name.trim().is_empty() {
                anyhow::bail!("project name must not be empty");
            }
            let project = ws
                .engine
                .create_project(&ws.conn, &args.name)
                .map_err(|e| fail(output, e))?;
            render(output, &project, |p, _, w| writeln!(w, "{}  {}", p.id, p.name))
        }
        ProjectCommand::List => {
            let projects = ws
                .engine
                .list_projects(&ws.conn)
                .map_err(|e| fail(output, e))?;
            render(output, &projects, |projects, mode, w| {
                if mode.is_pretty() {
                    pretty_section(w, &format!("Projects ({})", projects.len()))?;
                }
                for p in projects {
                    writeln!(w, "{}  {}  (updated {})", p.id, p.name, format_us(p.updated_at_us))?;
                }
                Ok(())
            })
        }
    }
}

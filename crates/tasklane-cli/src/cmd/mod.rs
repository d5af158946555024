pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod move_cmd;
pub mod project;
pub mod show;

use crate::output::{CliError, OutputMode, fail, render_error};
use rusqlite::Connection;
use std::path::Path;
use tasklane_core::config::{self, ProjectConfig};
use tasklane_core::{Engine, ErrorCode, RankError, Status, Task, db};

/// An open store plus the engine configured for it.
pub struct Workspace {
    pub conn: Connection,
    pub engine: Engine,
}

/// Open the task database, returning a helpful error if `tl init` never ran.
pub fn open_workspace(project_root: &Path, output: OutputMode) -> anyhow::Result<Workspace> {
    let state_dir = config::state_dir(project_root);
    if !state_dir.is_dir() {
        let code = ErrorCode::NotInitialized;
        let mut err = CliError::new(format!("{} at {}", code.message(), project_root.display()));
        err.suggestion = code.hint().map(str::to_string);
        err.error_code = Some(code.code().to_string());
        render_error(output, &err)?;
        anyhow::bail!("{} not found; run `tl init`", state_dir.display());
    }

    let config: ProjectConfig =
        config::load_project_config(project_root).map_err(|e| fail(output, e))?;
    let conn = db::open_store(&config::db_path(project_root), config.store.busy_timeout())
        .map_err(|e| fail(output, e))?;

    Ok(Workspace {
        conn,
        engine: Engine::from_config(&config),
    })
}

/// Parse a `--status` argument, reporting unknown names as `E2005`.
pub fn parse_status(raw: &str, output: OutputMode) -> anyhow::Result<Status> {
    raw.parse::<Status>()
        .map_err(|err| fail(output, RankError::from(err)))
}

/// Parse an optional `--status` argument.
pub fn parse_status_opt(raw: Option<&str>, output: OutputMode) -> anyhow::Result<Option<Status>> {
    raw.map(|s| parse_status(s, output)).transpose()
}

/// Format a microsecond timestamp for humans.
pub fn format_us(us: i64) -> String {
    chrono::DateTime::from_timestamp_micros(us)
        .map_or_else(|| us.to_string(), |dt| dt.to_rfc3339())
}

/// One row per task: `id  status  rank  title`.
pub fn write_task_row(w: &mut dyn std::io::Write, task: &Task) -> std::io::Result<()> {
    writeln!(
        w,
        "{}  {:<11}  {:>10}  {}",
        task.id, task.status, task.rank, task.title
    )
}

use crate::output::{OutputMode, render};
use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::json;
use std::path::Path;
use tasklane_core::config;
use tasklane_core::db;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite `config.toml` even if `.tasklane/` already exists.
    #[arg(long)]
    pub force: bool,
}

/// Execute `tl init`. Creates:
///
/// ```text
/// .tasklane/
///   config.toml    (default ordering and store settings)
///   tasklane.db    (migrated SQLite store)
/// ```
///
/// # Errors
///
/// Returns an error if `.tasklane/` already exists and `--force` is not set,
/// or if any filesystem or database operation fails.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let state_dir = config::state_dir(project_root);

    if state_dir.exists() && !args.force {
        anyhow::bail!(".tasklane/ already exists. Use `tl init --force` to reinitialize.");
    }

    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("create {}", state_dir.display()))?;
    let config_path = state_dir.join(config::CONFIG_FILE);
    std::fs::write(&config_path, config::default_config_toml())
        .with_context(|| format!("write {}", config_path.display()))?;

    let db_path = config::db_path(project_root);
    db::open_store(&db_path, db::DEFAULT_BUSY_TIMEOUT)
        .with_context(|| format!("initialize {}", db_path.display()))?;
    tracing::info!(path = %state_dir.display(), "initialized tasklane directory");

    let value = json!({
        "ok": true,
        "path": state_dir.display().to_string(),
    });
    render(output, &value, |_, _, w| {
        writeln!(w, "Initialized tasklane in {}", state_dir.display())
    })
}

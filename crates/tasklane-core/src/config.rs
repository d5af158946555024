use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::RankError;
use crate::rank::{DEFAULT_GAP, OrderingOptions, PivotScope};

/// Name of the per-directory state folder.
pub const STATE_DIR: &str = ".tasklane";
/// Database file inside [`STATE_DIR`].
pub const DB_FILE: &str = "tasklane.db";
/// Config file inside [`STATE_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub ordering: OrderingConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Rank distance between freshly appended siblings, and the step used
    /// when extending past the first or last neighbor.
    #[serde(default = "default_gap")]
    pub gap: f64,
    /// Which rows the pivot lookup of a move sees.
    #[serde(default)]
    pub pivot_scope: PivotScope,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            gap: default_gap(),
            pivot_scope: PivotScope::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl ProjectConfig {
    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Config`] when the gap is not a positive finite number.
    pub fn validate(&self) -> Result<(), RankError> {
        let gap = self.ordering.gap;
        if !gap.is_finite() || gap <= 0.0 {
            return Err(RankError::Config(format!(
                "ordering.gap must be a positive finite number, got {gap}"
            )));
        }
        Ok(())
    }

    /// Engine options derived from the `[ordering]` table.
    #[must_use]
    pub const fn ordering_options(&self) -> OrderingOptions {
        OrderingOptions {
            gap: self.ordering.gap,
            pivot_scope: self.ordering.pivot_scope,
        }
    }
}

/// Path of the state directory under `root`.
#[must_use]
pub fn state_dir(root: &Path) -> PathBuf {
    root.join(STATE_DIR)
}

/// Path of the database file under `root`.
#[must_use]
pub fn db_path(root: &Path) -> PathBuf {
    state_dir(root).join(DB_FILE)
}

/// Load `.tasklane/config.toml`, falling back to defaults when absent.
///
/// # Errors
///
/// Returns [`RankError::Config`] if the file cannot be read, parsed, or
/// fails validation.
pub fn load_project_config(root: &Path) -> Result<ProjectConfig, RankError> {
    let path = state_dir(root).join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|err| RankError::Config(format!("failed to read {}: {err}", path.display())))?;

    let config = parse_config(&content)
        .map_err(|err| RankError::Config(format!("failed to parse {}: {err}", path.display())))?;
    config.validate()?;
    Ok(config)
}

fn parse_config(content: &str) -> Result<ProjectConfig, toml::de::Error> {
    toml::from_str::<ProjectConfig>(content)
}

/// Default config written by `tl init`.
#[must_use]
pub fn default_config_toml() -> String {
    format!(
        "[ordering]\n\
         gap = {:.1}\n\
         pivot_scope = \"project\"\n\
         \n\
         [store]\n\
         busy_timeout_ms = {}\n",
        default_gap(),
        default_busy_timeout_ms()
    )
}

const fn default_gap() -> f64 {
    DEFAULT_GAP
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

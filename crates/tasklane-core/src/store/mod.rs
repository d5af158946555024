//! Persistence seam for the ordering engine.
//!
//! The engine only reads tasks by ID or by ascending-rank offset within a
//! [`Scope`], reads the highest rank in a project, and writes back single
//! rows. [`TaskStore`] is that surface; [`crate::db::store::SqliteStore`]
//! implements it over a borrowed connection or transaction and
//! [`memory::MemoryStore`] is an in-process fake with the same ordering
//! rules.

pub mod memory;

use crate::error::RankError;
use crate::model::{Project, Status, Task};

/// Rows a rank probe is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    pub project_id: &'a str,
    /// `None` means every status in the project.
    pub status: Option<Status>,
}

impl<'a> Scope<'a> {
    /// Whole-project scope, status-blind.
    #[must_use]
    pub const fn project(project_id: &'a str) -> Self {
        Self {
            project_id,
            status: None,
        }
    }

    /// One status column inside a project.
    #[must_use]
    pub const fn column(project_id: &'a str, status: Status) -> Self {
        Self {
            project_id,
            status: Some(status),
        }
    }

    /// Returns `true` when `task` is visible through this scope.
    #[must_use]
    pub fn contains(&self, task: &Task) -> bool {
        task.project_id == self.project_id && self.status.is_none_or(|s| s == task.status)
    }
}

/// Row-level operations the ordering engine depends on.
///
/// Ordered reads sort by `rank` ascending with `id` ascending as the tie
/// breaker, so equal ranks still read back in a stable order.
pub trait TaskStore {
    /// Point lookup of a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn fetch_task(&self, task_id: &str) -> Result<Option<Task>, RankError>;

    /// Point lookup of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn fetch_project(&self, project_id: &str) -> Result<Option<Project>, RankError>;

    /// The single task at zero-based `offset` in ascending rank order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn fetch_at_offset(&self, scope: &Scope<'_>, offset: u32) -> Result<Option<Task>, RankError>;

    /// Highest rank visible through `scope`, or `None` when it is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn fetch_max_rank(&self, scope: &Scope<'_>) -> Result<Option<f64>, RankError>;

    /// Insert a new task row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be written.
    fn insert_task(&self, task: &Task) -> Result<(), RankError>;

    /// Persist `status`, `rank` and `updated_at_us` of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::TaskNotFound`] if the row is gone, or a store error.
    fn update_task(&self, task: &Task) -> Result<(), RankError>;

    /// Remove a task row. Returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn delete_task(&self, task_id: &str) -> Result<bool, RankError>;

    /// Set the project's `updated_at_us`. Returns `false` when the project
    /// row does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn touch_project(&self, project_id: &str, now_us: i64) -> Result<bool, RankError>;
}

//! [`TaskStore`] over a borrowed `SQLite` connection.

use rusqlite::Connection;

use super::query;
use crate::error::RankError;
use crate::model::{Project, Task};
use crate::store::{Scope, TaskStore};

/// Store operations bound to one connection.
///
/// Pass a `&Transaction` (it derefs to `&Connection`) to keep every read
/// and write of one engine call inside the same transaction.
#[derive(Clone, Copy)]
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskStore for SqliteStore<'_> {
    fn fetch_task(&self, task_id: &str) -> Result<Option<Task>, RankError> {
        Ok(query::get_task(self.conn, task_id)?)
    }

    fn fetch_project(&self, project_id: &str) -> Result<Option<Project>, RankError> {
        Ok(query::get_project(self.conn, project_id)?)
    }

    fn fetch_at_offset(&self, scope: &Scope<'_>, offset: u32) -> Result<Option<Task>, RankError> {
        Ok(query::task_at_offset(self.conn, scope, offset)?)
    }

    fn fetch_max_rank(&self, scope: &Scope<'_>) -> Result<Option<f64>, RankError> {
        Ok(query::max_rank(self.conn, scope)?)
    }

    fn insert_task(&self, task: &Task) -> Result<(), RankError> {
        Ok(query::insert_task(self.conn, task)?)
    }

    fn update_task(&self, task: &Task) -> Result<(), RankError> {
        if query::update_task_placement(self.conn, task)? == 0 {
            return Err(RankError::TaskNotFound(task.id.clone()));
        }
        Ok(())
    }

    fn delete_task(&self, task_id: &str) -> Result<bool, RankError> {
        Ok(query::delete_task(self.conn, task_id)? > 0)
    }

    fn touch_project(&self, project_id: &str, now_us: i64) -> Result<bool, RankError> {
        Ok(query::touch_project(self.conn, project_id, now_us)? > 0)
    }
}

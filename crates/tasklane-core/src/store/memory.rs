//! In-memory [`TaskStore`] for tests and embedding.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{Scope, TaskStore};
use crate::error::RankError;
use crate::model::{Project, Task};

/// A single-threaded store holding rows in ordered maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: RefCell<BTreeMap<String, Project>>,
    tasks: RefCell<BTreeMap<String, Task>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project row.
    pub fn put_project(&self, project: Project) {
        self.projects
            .borrow_mut()
            .insert(project.id.clone(), project);
    }

    /// Seed a task row, replacing any row with the same ID.
    pub fn put_task(&self, task: Task) {
        self.tasks.borrow_mut().insert(task.id.clone(), task);
    }

    /// Tasks visible through `scope`, ascending by rank then ID.
    #[must_use]
    pub fn ordered(&self, scope: &Scope<'_>) -> Vec<Task> {
        let mut rows: Vec<Task> = self
            .tasks
            .borrow()
            .values()
            .filter(|task| scope.contains(task))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.rank.total_cmp(&b.rank).then_with(|| a.id.cmp(&b.id)));
        rows
    }
}

impl TaskStore for MemoryStore {
    fn fetch_task(&self, task_id: &str) -> Result<Option<Task>, RankError> {
        Ok(self.tasks.borrow().get(task_id).cloned())
    }

    fn fetch_project(&self, project_id: &str) -> Result<Option<Project>, RankError> {
        Ok(self.projects.borrow().get(project_id).cloned())
    }

    fn fetch_at_offset(&self, scope: &Scope<'_>, offset: u32) -> Result<Option<Task>, RankError> {
        let index = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(self.ordered(scope).into_iter().nth(index))
    }

    fn fetch_max_rank(&self, scope: &Scope<'_>) -> Result<Option<f64>, RankError> {
        Ok(self.ordered(scope).last().map(|task| task.rank))
    }

    fn insert_task(&self, task: &Task) -> Result<(), RankError> {
        self.put_task(task.clone());
        Ok(())
    }

    fn update_task(&self, task: &Task) -> Result<(), RankError> {
        let mut tasks = self.tasks.borrow_mut();
        let row = tasks
            .get_mut(&task.id)
            .ok_or_else(|| RankError::TaskNotFound(task.id.clone()))?;
        row.status = task.status;
        row.rank = task.rank;
        row.updated_at_us = task.updated_at_us;
        Ok(())
    }

    fn delete_task(&self, task_id: &str) -> Result<bool, RankError> {
        Ok(self.tasks.borrow_mut().remove(task_id).is_some())
    }

    fn touch_project(&self, project_id: &str, now_us: i64) -> Result<bool, RankError> {
        Ok(self
            .projects
            .borrow_mut()
            .get_mut(project_id)
            .map(|project| project.updated_at_us = now_us)
            .is_some())
    }
}

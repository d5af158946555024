//! Create, move and delete tasks while keeping the rank order consistent.
//!
//! The `*_in` functions are written against any [`TaskStore`] and never
//! manage transactions themselves. [`Engine`] wraps each of them in one
//! `BEGIN IMMEDIATE` transaction on a `SQLite` connection: the writer lock
//! is taken before the neighbor reads, so two concurrent moves can never
//! plan against the same snapshot, and the task write and the project touch
//! commit or roll back together.

use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;

use crate::config::ProjectConfig;
use crate::db::{query, store::SqliteStore};
use crate::error::RankError;
use crate::model::{self, NewTask, Project, Status, Task};
use crate::rank::{MoveRequest, OrderingOptions, Placement, allocate_append_rank, plan_rank};
use crate::store::{Scope, TaskStore};

/// Result of a committed move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveOutcome {
    pub task_id: String,
    pub project_id: String,
    pub from_status: Status,
    pub to_status: Status,
    pub from_rank: f64,
    pub to_rank: f64,
    pub placement: Placement,
}

/// Append a task to the end of its project.
///
/// # Errors
///
/// Returns [`RankError::ProjectNotFound`] if the project does not exist, or
/// any store error.
pub fn create_task_in(
    store: &impl TaskStore,
    new_task: &NewTask,
    options: &OrderingOptions,
    now_us: i64,
) -> Result<Task, RankError> {
    if store.fetch_project(&new_task.project_id)?.is_none() {
        return Err(RankError::ProjectNotFound(new_task.project_id.clone()));
    }

    let rank = allocate_append_rank(store, &new_task.project_id, options.gap)?;
    let task = Task {
        id: model::id::task_id(&new_task.project_id, &new_task.title, now_us),
        project_id: new_task.project_id.clone(),
        title: new_task.title.clone(),
        description: new_task.description.clone(),
        status: new_task.status,
        rank,
        created_at_us: now_us,
        updated_at_us: now_us,
    };

    store.insert_task(&task)?;
    touch_parent(store, &task.project_id, now_us)?;
    Ok(task)
}

/// Persist a planned rank and status on a task and touch its project.
///
/// # Errors
///
/// Returns [`RankError::TaskNotFound`] or [`RankError::ProjectNotFound`]
/// when either row is missing, or any store error.
pub fn apply_move(
    store: &impl TaskStore,
    task_id: &str,
    status: Status,
    rank: f64,
    now_us: i64,
) -> Result<Task, RankError> {
    let mut task = store
        .fetch_task(task_id)?
        .ok_or_else(|| RankError::TaskNotFound(task_id.to_string()))?;

    task.status = status;
    task.rank = rank;
    task.updated_at_us = now_us;
    store.update_task(&task)?;
    touch_parent(store, &task.project_id, now_us)?;
    Ok(task)
}

/// Move a task to `target_offset`, optionally into another status column.
///
/// `target_status` of `None` keeps the task's current status.
///
/// # Errors
///
/// Returns [`RankError::TaskNotFound`] if the task does not exist,
/// [`RankError::RankExhausted`] if no distinct rank is left at the target,
/// or any store error.
pub fn move_task_in(
    store: &impl TaskStore,
    task_id: &str,
    target_status: Option<Status>,
    target_offset: u32,
    options: &OrderingOptions,
    now_us: i64,
) -> Result<MoveOutcome, RankError> {
    let task = store
        .fetch_task(task_id)?
        .ok_or_else(|| RankError::TaskNotFound(task_id.to_string()))?;
    let to_status = target_status.unwrap_or(task.status);

    let plan = plan_rank(
        store,
        &MoveRequest::for_task(&task, to_status, target_offset),
        options,
    )?;
    let moved = apply_move(store, task_id, to_status, plan.rank, now_us)?;

    Ok(MoveOutcome {
        task_id: moved.id,
        project_id: moved.project_id,
        from_status: task.status,
        to_status: moved.status,
        from_rank: task.rank,
        to_rank: moved.rank,
        placement: plan.placement,
    })
}

/// Remove a task. Sibling ranks are left as they are.
///
/// # Errors
///
/// Returns [`RankError::TaskNotFound`] if the task does not exist, or any
/// store error.
pub fn delete_task_in(
    store: &impl TaskStore,
    task_id: &str,
    now_us: i64,
) -> Result<Task, RankError> {
    let task = store
        .fetch_task(task_id)?
        .ok_or_else(|| RankError::TaskNotFound(task_id.to_string()))?;

    if !store.delete_task(task_id)? {
        return Err(RankError::TaskNotFound(task_id.to_string()));
    }
    touch_parent(store, &task.project_id, now_us)?;
    Ok(task)
}

fn touch_parent(store: &impl TaskStore, project_id: &str, now_us: i64) -> Result<(), RankError> {
    if store.touch_project(project_id, now_us)? {
        Ok(())
    } else {
        Err(RankError::ProjectNotFound(project_id.to_string()))
    }
}

/// Transactional entry points over a `SQLite` connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    options: OrderingOptions,
}

impl Engine {
    #[must_use]
    pub const fn new(options: OrderingOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn from_config(config: &ProjectConfig) -> Self {
        Self::new(config.ordering_options())
    }

    #[must_use]
    pub const fn options(&self) -> &OrderingOptions {
        &self.options
    }

    /// Create an empty project.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_project(&self, conn: &Connection, name: &str) -> Result<Project, RankError> {
        let project = Project::new(name.trim(), model::now_us());
        query::insert_project(conn, &project)?;
        tracing::info!(project_id = %project.id, name = %project.name, "created project");
        Ok(project)
    }

    /// Append a task to a project.
    ///
    /// # Errors
    ///
    /// See [`create_task_in`].
    pub fn create_task(&self, conn: &mut Connection, new_task: &NewTask) -> Result<Task, RankError> {
        let task = write_tx(conn, |store| {
            create_task_in(store, new_task, &self.options, model::now_us())
        })?;
        tracing::info!(
            task_id = %task.id,
            project_id = %task.project_id,
            status = %task.status,
            rank = task.rank,
            "created task"
        );
        Ok(task)
    }

    /// Move a task; planning and both writes share one transaction.
    ///
    /// # Errors
    ///
    /// See [`move_task_in`].
    pub fn move_task(
        &self,
        conn: &mut Connection,
        task_id: &str,
        target_status: Option<Status>,
        target_offset: u32,
    ) -> Result<MoveOutcome, RankError> {
        let outcome = write_tx(conn, |store| {
            move_task_in(
                store,
                task_id,
                target_status,
                target_offset,
                &self.options,
                model::now_us(),
            )
        })?;
        tracing::info!(
            task_id = %outcome.task_id,
            from_status = %outcome.from_status,
            to_status = %outcome.to_status,
            from_rank = outcome.from_rank,
            to_rank = outcome.to_rank,
            placement = ?outcome.placement,
            "moved task"
        );
        Ok(outcome)
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// See [`delete_task_in`].
    pub fn delete_task(&self, conn: &mut Connection, task_id: &str) -> Result<Task, RankError> {
        let task = write_tx(conn, |store| delete_task_in(store, task_id, model::now_us()))?;
        tracing::info!(task_id = %task.id, project_id = %task.project_id, "deleted task");
        Ok(task)
    }

    /// Fetch one task.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::TaskNotFound`] if it does not exist.
    pub fn get_task(&self, conn: &Connection, task_id: &str) -> Result<Task, RankError> {
        query::get_task(conn, task_id)?.ok_or_else(|| RankError::TaskNotFound(task_id.to_string()))
    }

    /// Tasks of a project (optionally one column) in board order.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::ProjectNotFound`] if the project does not exist.
    pub fn list_tasks(
        &self,
        conn: &Connection,
        project_id: &str,
        status: Option<Status>,
    ) -> Result<Vec<Task>, RankError> {
        if query::get_project(conn, project_id)?.is_none() {
            return Err(RankError::ProjectNotFound(project_id.to_string()));
        }
        let scope = Scope {
            project_id,
            status,
        };
        Ok(query::list_tasks(conn, &scope)?)
    }

    /// Every project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_projects(&self, conn: &Connection) -> Result<Vec<Project>, RankError> {
        Ok(query::list_projects(conn)?)
    }
}

/// Run `f` inside an immediate transaction and commit on success.
fn write_tx<T>(
    conn: &mut Connection,
    f: impl FnOnce(&SqliteStore<'_>) -> Result<T, RankError>,
) -> Result<T, RankError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let out = f(&SqliteStore::new(&tx))?;
    tx.commit()?;
    Ok(out)
}

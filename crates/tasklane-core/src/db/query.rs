//! `SQLite` query helpers for the task store.
//!
//! All functions take a shared `&Connection` (a `Transaction` derefs to one)
//! and return typed structs, never raw rows. Ordered reads always sort by
//! `rank ASC, task_id ASC`.

use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};

use crate::model::{Project, Status, Task};
use crate::store::Scope;

const TASK_COLUMNS: &str = "task_id, project_id, title, description, status, rank, \
                            created_at_us, updated_at_us";

/// `?2` binds the scope's status, or NULL for the whole project.
const SCOPE_STATUS_FILTER: &str = "(?2 IS NULL OR status = ?2)";

const PROJECT_COLUMNS: &str = "project_id, name, created_at_us, updated_at_us";

fn scope_status(scope: &Scope<'_>) -> Option<&'static str> {
    scope.status.map(Status::as_str)
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let status: String = row.get(4)?;
    let status = status
        .parse::<Status>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(err)))?;

    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status,
        rank: row.get(5)?,
        created_at_us: row.get(6)?,
        updated_at_us: row.get(7)?,
    })
}

fn row_to_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at_us: row.get(2)?,
        updated_at_us: row.get(3)?,
    })
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Fetch a single task by exact `task_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_task(conn: &Connection, task_id: &str) -> rusqlite::Result<Option<Task>> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = ?1"),
        [task_id],
        row_to_task,
    )
    .optional()
}

/// Fetch the task at zero-based `offset` in ascending rank order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn task_at_offset(
    conn: &Connection,
    scope: &Scope<'_>,
    offset: u32,
) -> rusqlite::Result<Option<Task>> {
    conn.query_row(
        &format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE project_id = ?1 AND {SCOPE_STATUS_FILTER} \
             ORDER BY rank ASC, task_id ASC LIMIT 1 OFFSET ?3"
        ),
        params![scope.project_id, scope_status(scope), i64::from(offset)],
        row_to_task,
    )
    .optional()
}

/// Highest rank in `scope`, or `None` when the scope is empty.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn max_rank(conn: &Connection, scope: &Scope<'_>) -> rusqlite::Result<Option<f64>> {
    conn.query_row(
        &format!("SELECT MAX(rank) FROM tasks WHERE project_id = ?1 AND {SCOPE_STATUS_FILTER}"),
        params![scope.project_id, scope_status(scope)],
        |row| row.get(0),
    )
}

/// List tasks in `scope`, ascending by rank.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_tasks(conn: &Connection, scope: &Scope<'_>) -> rusqlite::Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks \
         WHERE project_id = ?1 AND {SCOPE_STATUS_FILTER} \
         ORDER BY rank ASC, task_id ASC"
    ))?;
    let rows = stmt.query_map(params![scope.project_id, scope_status(scope)], row_to_task)?;
    rows.collect()
}

/// Insert a task row.
///
/// # Errors
///
/// Returns an error if the insert fails (including foreign-key violations
/// for an unknown project).
pub fn insert_task(conn: &Connection, task: &Task) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO tasks (
            task_id, project_id, title, description, status, rank,
            created_at_us, updated_at_us
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            task.id,
            task.project_id,
            task.title,
            task.description,
            task.status.as_str(),
            task.rank,
            task.created_at_us,
            task.updated_at_us,
        ],
    )?;
    Ok(())
}

/// Write `status`, `rank` and `updated_at_us` for a task. Returns the number
/// of rows changed.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_task_placement(conn: &Connection, task: &Task) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE tasks SET status = ?2, rank = ?3, updated_at_us = ?4 WHERE task_id = ?1",
        params![task.id, task.status.as_str(), task.rank, task.updated_at_us],
    )
}

/// Delete a task row. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_task(conn: &Connection, task_id: &str) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM tasks WHERE task_id = ?1", [task_id])
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Fetch a single project by exact `project_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_project(conn: &Connection, project_id: &str) -> rusqlite::Result<Option<Project>> {
    conn.query_row(
        &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = ?1"),
        [project_id],
        row_to_project,
    )
    .optional()
}

/// List every project, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_projects(conn: &Connection) -> rusqlite::Result<Vec<Project>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at_us ASC, project_id ASC"
    ))?;
    let rows = stmt.query_map([], row_to_project)?;
    rows.collect()
}

/// Insert a project row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_project(conn: &Connection, project: &Project) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO projects (project_id, name, created_at_us, updated_at_us)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            project.id,
            project.name,
            project.created_at_us,
            project.updated_at_us
        ],
    )?;
    Ok(())
}

/// Set a project's `updated_at_us`. Returns the number of rows changed.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn touch_project(conn: &Connection, project_id: &str, now_us: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE projects SET updated_at_us = ?2 WHERE project_id = ?1",
        params![project_id, now_us],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;

    fn test_db() -> Connection {
        let mut conn = Connection::open_in_memory().expect("open in-memory db");
        migrations::migrate(&mut conn).expect("migrate");
        let project = Project {
            id: "prj-0000000001".into(),
            name: "Board".into(),
            created_at_us: 10,
            updated_at_us: 10,
        };
        insert_project(&conn, &project).expect("insert project");
        conn
    }

    fn task(id: &str, status: Status, rank: f64) -> Task {
        Task {
            id: id.into(),
            project_id: "prj-0000000001".into(),
            title: format!("title of {id}"),
            description: None,
            status,
            rank,
            created_at_us: 20,
            updated_at_us: 20,
        }
    }

    #[test]
    fn get_task_roundtrips_all_columns() {
        let conn = test_db();
        let mut row = task("tsk-0000000001", Status::InProgress, -1500.5);
        row.description = Some("details".into());
        insert_task(&conn, &row).unwrap();

        let fetched = get_task(&conn, "tsk-0000000001").unwrap().unwrap();
        assert_eq!(fetched, row);
        assert!(get_task(&conn, "tsk-missing").unwrap().is_none());
    }

    #[test]
    fn offset_probe_respects_scope() {
        let conn = test_db();
        insert_task(&conn, &task("tsk-0000000001", Status::Todo, 0.0)).unwrap();
        insert_task(&conn, &task("tsk-0000000002", Status::Done, 500.0)).unwrap();
        insert_task(&conn, &task("tsk-0000000003", Status::Todo, 1000.0)).unwrap();

        let project = Scope::project("prj-0000000001");
        let todo = Scope::column("prj-0000000001", Status::Todo);

        let second = task_at_offset(&conn, &project, 1).unwrap().unwrap();
        assert_eq!(second.id, "tsk-0000000002");
        let second_todo = task_at_offset(&conn, &todo, 1).unwrap().unwrap();
        assert_eq!(second_todo.id, "tsk-0000000003");
        assert!(task_at_offset(&conn, &todo, 2).unwrap().is_none());

        assert_eq!(list_tasks(&conn, &todo).unwrap().len(), 2);
        assert_eq!(list_tasks(&conn, &project).unwrap().len(), 3);
    }

    #[test]
    fn equal_ranks_read_back_in_id_order() {
        let conn = test_db();
        insert_task(&conn, &task("tsk-000000000b", Status::Todo, 7.0)).unwrap();
        insert_task(&conn, &task("tsk-000000000a", Status::Todo, 7.0)).unwrap();

        let scope = Scope::project("prj-0000000001");
        let ids: Vec<_> = list_tasks(&conn, &scope)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["tsk-000000000a", "tsk-000000000b"]);
    }

    #[test]
    fn max_rank_is_none_for_empty_scope() {
        let conn = test_db();
        let scope = Scope::project("prj-0000000001");
        assert_eq!(max_rank(&conn, &scope).unwrap(), None);

        insert_task(&conn, &task("tsk-0000000001", Status::Todo, 3000.0)).unwrap();
        insert_task(&conn, &task("tsk-0000000002", Status::Done, 1000.0)).unwrap();
        assert_eq!(max_rank(&conn, &scope).unwrap(), Some(3000.0));
        assert_eq!(
            max_rank(&conn, &Scope::column("prj-0000000001", Status::Done)).unwrap(),
            Some(1000.0)
        );
    }

    #[test]
    fn update_placement_reports_missing_rows() {
        let conn = test_db();
        let mut row = task("tsk-0000000001", Status::Todo, 0.0);
        assert_eq!(update_task_placement(&conn, &row).unwrap(), 0);

        insert_task(&conn, &row).unwrap();
        row.status = Status::Done;
        row.rank = 250.0;
        row.updated_at_us = 99;
        assert_eq!(update_task_placement(&conn, &row).unwrap(), 1);

        let fetched = get_task(&conn, &row.id).unwrap().unwrap();
        assert_eq!(fetched.status, Status::Done);
        assert!((fetched.rank - 250.0).abs() < f64::EPSILON);
        assert_eq!(fetched.updated_at_us, 99);
    }

    #[test]
    fn touch_project_updates_timestamp() {
        let conn = test_db();
        assert_eq!(touch_project(&conn, "prj-0000000001", 77).unwrap(), 1);
        assert_eq!(touch_project(&conn, "prj-missing", 77).unwrap(), 0);
        let project = get_project(&conn, "prj-0000000001").unwrap().unwrap();
        assert_eq!(project.updated_at_us, 77);
        assert_eq!(list_projects(&conn).unwrap().len(), 1);
    }

    #[test]
    fn deleting_project_cascades_to_tasks() {
        let conn = test_db();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        insert_task(&conn, &task("tsk-0000000001", Status::Todo, 0.0)).unwrap();
        conn.execute("DELETE FROM projects WHERE project_id = 'prj-0000000001'", [])
            .unwrap();
        assert!(get_task(&conn, "tsk-0000000001").unwrap().is_none());
    }
}

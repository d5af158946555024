//! Canonical `SQLite` schema for tasklane.
//!
//! - `projects` holds the parent aggregate whose `updated_at_us` every
//!   task mutation touches
//! - `tasks` holds the ordered items; `rank` is a double-precision sort key
//!   compared only within one `project_id`
//! - `store_meta` mirrors the schema version for diagnostics

/// Migration v1: core tables plus store metadata.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS projects (
    project_id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    created_at_us INTEGER NOT NULL,
    updated_at_us INTEGER NOT NULL,
    CHECK (project_id LIKE 'prj-%')
);

CREATE TABLE IF NOT EXISTS tasks (
    task_id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES projects(project_id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'todo' CHECK (status IN ('todo', 'in_progress', 'done')),
    rank REAL NOT NULL,
    created_at_us INTEGER NOT NULL,
    updated_at_us INTEGER NOT NULL,
    CHECK (task_id LIKE 'tsk-%')
);

CREATE TABLE IF NOT EXISTS store_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL
);

INSERT OR IGNORE INTO store_meta (id, schema_version) VALUES (1, 1);
";

/// Migration v2: indexes for offset-based neighbor probing.
///
/// `(project_id, status, rank)` serves the status-scoped sibling lookup;
/// `(project_id, rank)` serves the partition-blind pivot lookup and the
/// max-rank probe used when appending.
pub const MIGRATION_V2_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_tasks_project_status_rank
    ON tasks(project_id, status, rank);

CREATE INDEX IF NOT EXISTS idx_tasks_project_rank
    ON tasks(project_id, rank);

CREATE INDEX IF NOT EXISTS idx_projects_created
    ON projects(created_at_us);
";

/// Indexes expected to exist after all migrations.
pub const REQUIRED_INDEXES: &[&str] = &[
    "idx_tasks_project_status_rank",
    "idx_tasks_project_rank",
    "idx_projects_created",
];

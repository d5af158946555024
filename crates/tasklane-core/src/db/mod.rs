//! `SQLite` task store utilities.
//!
//! Runtime defaults:
//! - `journal_mode = WAL` to allow concurrent readers while one writer moves
//! - `busy_timeout = 5s` so a second writer waits for the first instead of failing
//! - `foreign_keys = ON` so tasks cannot outlive their project

pub mod migrations;
pub mod query;
pub mod schema;
pub mod store;

use rusqlite::Connection;
use std::{path::Path, time::Duration};

use crate::error::RankError;

/// Busy timeout used for store connections.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (or create) the task database, apply runtime pragmas, and migrate
/// schema to the latest version.
///
/// # Errors
///
/// Returns an error if opening/configuring/migrating the database fails.
pub fn open_store(path: &Path, busy_timeout: Duration) -> Result<Connection, RankError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            RankError::Config(format!(
                "create store directory {}: {err}",
                parent.display()
            ))
        })?;
    }

    let mut conn = Connection::open(path)?;
    configure_connection(&conn, busy_timeout)?;
    let version = migrations::migrate(&mut conn)?;
    tracing::debug!(path = %path.display(), version, "opened task store");

    Ok(conn)
}

/// Open an in-memory task database with the full schema applied.
///
/// # Errors
///
/// Returns an error if configuring or migrating the database fails.
pub fn open_in_memory() -> Result<Connection, RankError> {
    let mut conn = Connection::open_in_memory()?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    migrations::migrate(&mut conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    let _journal_mode: String =
        conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.busy_timeout(busy_timeout)?;
    Ok(())
}

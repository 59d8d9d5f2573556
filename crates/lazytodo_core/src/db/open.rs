//! Connection bootstrap for the SQLite-backed store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Create missing parent directories for file-backed stores.
//! - Apply schema migrations before handing the connection out.
//!
//! # Invariants
//! - Returned connections are fully migrated.
//! - Reopening an initialized store applies nothing: the migration executor
//!   sees an up-to-date `user_version` and returns early.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the SQLite database file at `path` and applies pending migrations.
///
/// Missing parent directories are created first, so the default relative
/// location (`db/todo.db`) works from a fresh checkout.
///
/// # Side effects
/// - May create directories and the database file.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    instrumented_open("file", || {
        create_parent_dir(path)?;
        Ok(Connection::open(path)?)
    })
}

/// Opens an in-memory SQLite database and applies pending migrations.
/// Used by tests and callers that need a throwaway store.
pub fn open_db_in_memory() -> DbResult<Connection> {
    instrumented_open("memory", || Ok(Connection::open_in_memory()?))
}

fn instrumented_open(
    mode: &str,
    connect: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = connect().and_then(|mut conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }

    result
}

fn create_parent_dir(path: &Path) -> DbResult<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

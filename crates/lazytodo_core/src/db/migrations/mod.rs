//! Schema migrations for the todo store.
//!
//! # Responsibility
//! - Declare every schema version in order.
//! - Bring an opened connection up to the latest version atomically.
//!
//! # Invariants
//! - The installed version is mirrored in `PRAGMA user_version`.
//! - A store newer than this binary is rejected, never reinterpreted.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;
use std::cmp::Ordering;

/// Ordered (version, DDL) pairs. Append-only.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Latest schema version shipped with this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` to the latest schema version.
///
/// An up-to-date store is left untouched, so reopening never re-runs DDL. A
/// store whose version is ahead of this binary fails with `SchemaTooNew`
/// instead of being silently reinterpreted.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let installed = installed_version(conn)?;
    let target = latest_version();

    match installed.cmp(&target) {
        Ordering::Greater => Err(DbError::SchemaTooNew {
            found: installed,
            supported: target,
        }),
        Ordering::Equal => Ok(()),
        Ordering::Less => run_pending(conn, installed),
    }
}

fn run_pending(conn: &mut Connection, installed: u32) -> DbResult<()> {
    let tx = conn.transaction()?;

    for (version, sql) in MIGRATIONS
        .iter()
        .copied()
        .filter(|(version, _)| *version > installed)
    {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }

    tx.commit()?;
    Ok(())
}

fn installed_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

//! Connection acquisition for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections from a `StorageLocator`.
//! - Configure connection pragmas required by core behavior.
//! - Run `ensure_schema` before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have the schema applied and verified.
//! - A connection is released when dropped, on success and error paths alike.

use super::migrations::ensure_schema;
use super::{DbError, DbResult};
use crate::config::StorageLocator;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens the store named by `locator` and applies the schema.
///
/// # Side effects
/// - Creates the database file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(locator: &StorageLocator) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = locator.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let opened = match locator {
        StorageLocator::File(path) => Connection::open(path),
        StorageLocator::InMemory => Connection::open_in_memory(),
    };
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens a SQLite database file and applies the schema.
pub fn open_db_file(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db(&StorageLocator::file(path))
}

/// Opens a private in-memory SQLite database and applies the schema.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_db(&StorageLocator::InMemory)
}

/// Runs `work` against a freshly acquired connection and releases it after.
///
/// The connection is dropped before this function returns, whether `work`
/// succeeds, fails or panics.
pub fn with_db<T, E, F>(locator: &StorageLocator, work: F) -> Result<T, E>
where
    E: From<DbError>,
    F: FnOnce(&mut Connection) -> Result<T, E>,
{
    let mut conn = open_db(locator)?;
    work(&mut conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    ensure_schema(conn)?;
    Ok(())
}

//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and run migrations before handing the
//!   connection out.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (or creates) a SQLite database file and applies pending migrations.
///
/// Parent directories are created when missing. A parent that cannot be
/// created is reported as [`DbError::CreateDirectory`].
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", || {
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            // Connection::open reports a missing directory as CANTOPEN; create it first.
            std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Connection::open(path)?)
    })
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", || Ok(Connection::open_in_memory()?))
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = connect().map_err(|err| {
        let error_code = match err {
            DbError::CreateDirectory { .. } => "db_dir_create_failed",
            _ => "db_open_failed",
        };
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code={error_code} error={err}",
            started_at.elapsed().as_millis()
        );
        err
    })?;

    if let Err(err) = bootstrap_connection(&mut conn) {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={err}",
            started_at.elapsed().as_millis()
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

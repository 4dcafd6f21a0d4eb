//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the key-value store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No key-value reads or writes happen before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Parent directory of the database file could not be created.
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection was handed to a store before migrations ran.
    NotMigrated {
        db_version: u32,
        expected: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::CreateDirectory { path, source } => write!(
                f,
                "cannot create database directory `{}`: {source}",
                path.display()
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::NotMigrated {
                db_version,
                expected,
            } => write!(
                f,
                "database schema version {db_version} is not migrated to {expected}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::CreateDirectory { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } | Self::NotMigrated { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

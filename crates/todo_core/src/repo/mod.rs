//! Persistence adapter: key-value backends and the typed todo repository.
//!
//! # Responsibility
//! - Define the string-keyed store contract (`KeyValueStore`).
//! - Encode/decode the task collection and theme under their fixed keys.
//!
//! # Invariants
//! - Writes always replace the whole value of a key; there are no deltas.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv_store;
pub mod todo_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for key-value access and payload decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Task collection could not be serialized.
    Encode(serde_json::Error),
    /// Stored payload is malformed or violates task invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

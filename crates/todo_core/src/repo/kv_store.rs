//! Key-value store contract with SQLite and in-memory implementations.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

/// Durable string-keyed store used by the persistence adapter.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never set.
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed store over the `kv_entries` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// Fails when the connection has not been migrated to the latest schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let db_version = current_user_version(conn)?;
        let expected = latest_version();
        if db_version != expected {
            return Err(DbError::NotMigrated {
                db_version,
                expected,
            }
            .into());
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls observed so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Raw value access without going through the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

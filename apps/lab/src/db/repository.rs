//! Key/value store backing learner progress.

use crate::db::error::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Keys the application stores values under.
pub mod keys {
    pub const PROGRESS: &str = "lab.progress";
    pub const FLASHCARDS: &str = "lab.flashcards";

    /// Every key owned by the application.
    pub const ALL: &[&str] = &[PROGRESS, FLASHCARDS];
}

/// Opaque string-keyed blob storage.
///
/// Implementors provide the raw operations; the typed helpers never fail
/// the caller. Loads fall back to a default and saves report `false`, with
/// the underlying error logged.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;
    fn put_raw(&self, key: &str, value: &str) -> Result<()>;
    fn delete_raw(&self, key: &str) -> Result<()>;

    /// Load and decode a value. Misses and failures both yield `None`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read from store");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding undecodable stored value");
                None
            }
        }
    }

    /// Load a value, or `default` when it is missing or unreadable.
    fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.load(key).unwrap_or(default)
    }

    /// Encode and store a value. Returns whether the write succeeded.
    fn save<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(DbError::from)
            .and_then(|raw| self.put_raw(key, &raw));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to save to store");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.delete_raw(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to remove from store");
                false
            }
        }
    }

    /// Remove every application key.
    fn clear_all(&self) -> bool {
        keys::ALL.iter().fold(true, |ok, key| self.remove(key) && ok)
    }
}

/// SQLite implementation of the key/value store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open database at path, creating it and its directory if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (id, version) VALUES (1, ?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    pub fn schema_version(&self) -> Result<i32> {
        self.conn
            .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| {
                row.get(0)
            })
            .map_err(Into::into)
    }

    /// Keys currently present, in sorted order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt.query_map([], |row| row.get(0))?;
        keys.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
    }
}

impl KeyValueStore for SqliteStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

//! Shared key/value storage
//!
//! Durable storage visible to every process of the application. The
//! cross-view notifier writes its update keys here; other views read them
//! back to decide whether their cached data is stale.

use crate::error::Result;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed key/value store shared across application processes
pub struct SharedStorage {
    conn: Mutex<Connection>,
}

impl SharedStorage {
    /// Open (or create) the shared store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode so concurrent readers in other processes are not blocked
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.migrate()?;

        Ok(storage)
    }

    /// In-memory store, private to the process; for tests
    pub fn open_in_memory() -> Result<Self> {
        let storage = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        storage.migrate()?;

        Ok(storage)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.lock().execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )?;

        Ok(())
    }

    /// Write a value, replacing any previous one under the same key
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            rusqlite::params![key, value],
        )?;

        Ok(())
    }

    /// Read a value, `None` if the key was never written
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .lock()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let storage = SharedStorage::open_in_memory().unwrap();
        assert_eq!(storage.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let storage = SharedStorage::open_in_memory().unwrap();
        storage.set("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let storage = SharedStorage::open_in_memory().unwrap();
        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_persists_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.db");

        {
            let storage = SharedStorage::open(&path).unwrap();
            storage.set("k", "v").unwrap();
        }

        let reopened = SharedStorage::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }
}

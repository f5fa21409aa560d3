//! Key/value blob persistence.
//!
//! The roster is stored as a single serialized snapshot under a fixed key, so
//! storage only needs `load` and `save` over opaque bytes. [`Database`] keeps
//! blobs in SQLite; [`MemoryBlobStore`] keeps them in a map.

mod memory;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

pub use memory::MemoryBlobStore;

/// Creates the blob table. Safe to run on every open.
const SCHEMA: &str = include_str!("schema.sql");

/// Opaque byte storage addressed by string keys.
pub trait BlobStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` if nothing was saved.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `bytes` under `key`, replacing any previous value.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::with_connection(conn)
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Platform data directory location of the roster database.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "convoy-roster")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("roster.db"))
    }

    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Ensures the blob table exists. `open` and `open_memory` already call
    /// this; running it again leaves stored blobs alone.
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute_batch(SCHEMA).context("Failed to create blobs table")?;
        tracing::debug!("Blob table ready");
        Ok(())
    }
}

impl BlobStore for Database {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let value = conn
            .query_row("SELECT value FROM blobs WHERE key = ?", [key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()
            .with_context(|| format!("Failed to load blob {}", key))?;
        Ok(value)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO blobs (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, bytes, Utc::now().to_rfc3339()),
        )
        .with_context(|| format!("Failed to save blob {}", key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_memory_is_ready_without_explicit_migrate() {
        let db = Database::open_memory().unwrap();
        assert!(db.load("nothing-here").unwrap().is_none());
        db.save("k", b"value").unwrap();
        assert_eq!(db.load("k").unwrap(), Some(b"value".to_vec()));
    }

    #[test]
    fn save_overwrites_previous_value() {
        let db = Database::open_memory().unwrap();
        db.save("k", b"first").unwrap();
        db.save("k", b"second").unwrap();
        assert_eq!(db.load("k").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn migrate_again_keeps_stored_blobs() {
        let db = Database::open_memory().unwrap();
        db.save("k", b"kept").unwrap();

        db.migrate().unwrap();
        db.migrate().unwrap();

        assert_eq!(db.load("k").unwrap(), Some(b"kept".to_vec()));
    }

    #[test]
    fn reopening_a_file_keeps_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.db");

        Database::open(path.clone()).unwrap().save("k", b"on disk").unwrap();

        let reopened = Database::open(path).unwrap();
        assert_eq!(reopened.load("k").unwrap(), Some(b"on disk".to_vec()));
    }
}

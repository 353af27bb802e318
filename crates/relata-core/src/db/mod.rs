//! SQLite database module for relata

mod items;
mod related;
mod schema;

use crate::error::{RelataError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub use items::SyncResult;
pub use schema::{create_schema, SchemaCreateResult, CURRENT_SCHEMA_VERSION};

/// Database file name inside the store directory
pub const DB_FILE: &str = "relata.db";

/// SQLite database for relata
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given store root
    pub fn open(store_root: &Path) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);

        let conn = Connection::open(&db_path).map_err(|e| {
            RelataError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| RelataError::Other(format!("failed to enable WAL mode: {}", e)))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| RelataError::Other(format!("failed to enable foreign keys: {}", e)))?;

        create_schema(&conn)
            .map_err(|e| RelataError::Other(format!("failed to create database schema: {}", e)))?;

        Ok(Database { conn })
    }

    pub fn get_schema_version(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| crate::map_db_err!("get schema version", e))
    }

    pub fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO store_meta (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(|e| crate::map_db_err!("set store metadata", e))?;
        Ok(())
    }

    pub fn get_meta(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = ?1",
                params![key],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| crate::map_db_err!("get store metadata", e))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Checkpoint so the next process sees every committed write
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}

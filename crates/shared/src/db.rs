//! Database operations for SQLite.
//!
//! This module handles the database connection and schema for the local
//! key-value table that persists the favorites index.

use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Database connection wrapper
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        debug!(path = %path.display(), "Opening database");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;

        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Mutex::new(conn),
        };

        if !db.table_exists("kv_store")? {
            info!("Creating new database schema");
            db.conn()
                .execute_batch(include_str!("../schema.sql"))
                .context("Failed to create database schema")?;
        }

        Ok(db)
    }

    /// Lock the underlying connection
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Check if a table exists
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read key {}", key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
            .with_context(|| format!("Failed to write key {}", key))?;

        debug!(key = key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .with_context(|| format!("Failed to delete key {}", key))?;
        Ok(())
    }
}

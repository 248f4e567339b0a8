// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Settings key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("settings store error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("could not acquire the settings store lock")]
    Lock,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Lock
    }
}

/// Client-local persistent storage for the bearer token.
///
/// Reads and writes of the single token value are atomic, so callers on
/// different interactions need no extra coordination.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<String>, StoreError>;
    fn set(&self, token: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;

    /// Like [`TokenStore::get`] but a failing store counts as "no token".
    fn current(&self) -> Option<String> {
        match self.get() {
            Ok(t) => t.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read stored token");
                None
            }
        }
    }
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create data dir")?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_setting(conn: &Connection, key: &str) -> Result<(), StoreError> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

/// Token kept in the `settings` table of the local SQLite database.
pub struct SqliteTokenStore {
    conn: Mutex<Connection>,
}

impl SqliteTokenStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(open_or_init(path)?))
    }

    pub fn new(conn: Connection) -> Self {
        SqliteTokenStore {
            conn: Mutex::new(conn),
        }
    }
}

impl TokenStore for SqliteTokenStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock()?;
        get_setting(&conn, TOKEN_KEY)
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock()?;
        set_setting(&conn, TOKEN_KEY, token)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock()?;
        delete_setting(&conn, TOKEN_KEY)
    }
}

/// In-process token storage, used by tests and embedders without a disk.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        MemoryTokenStore {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.token.lock()?.clone())
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        *self.token.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.lock()? = None;
        Ok(())
    }
}

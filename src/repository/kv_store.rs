//! Key-Value Stores
//!
//! SQLite-backed and in-memory implementations of [`KeyValueStore`], plus
//! JSON helpers and the keys the application persists under.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};
use super::traits::KeyValueStore;

/// Signed-in user record
pub const CURRENT_USER_KEY: &str = "goals-app-user";
/// Full user collection
pub const USERS_KEY: &str = "goals-app-users";
/// `"true"` while a guest session is active
pub const GUEST_MODE_KEY: &str = "goals-app-guest-mode";
/// Guest goal list
pub const GUEST_GOALS_KEY: &str = "goals-app-guest-goals";
/// Selected theme identifier
pub const THEME_KEY: &str = "goals-app-theme";

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Internal(format!("Malformed stored value: {}", e))
    }
}

/// Read and decode a JSON value
pub async fn load_json<S, V>(store: &S, key: &str) -> DomainResult<Option<V>>
where
    S: KeyValueStore + ?Sized,
    V: DeserializeOwned,
{
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub async fn save_json<S, V>(store: &S, key: &str, value: &V) -> DomainResult<()>
where
    S: KeyValueStore + ?Sized,
    V: Serialize + Sync + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}

/// SQLite implementation of the key-value store
pub struct SqliteKvStore {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl SqliteKvStore {
    pub fn new(conn: Arc<Mutex<Option<Connection>>>) -> Self {
        Self { conn }
    }

    /// All stored keys, sorted
    pub async fn keys(&self) -> DomainResult<Vec<String>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let mut rows = stmt.query([])?;

        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get::<_, String>(0)?);
        }
        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().timestamp_millis()],
        )
        .map_err(|e| DomainError::Persistence(format!("Failed to write {}: {}", key, e)))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])?;
        Ok(())
    }
}

/// In-memory key-value store
///
/// Writes can be switched off to simulate an unavailable backend.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
    read_only: AtomicBool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail with a persistence error
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn check_writable(&self, key: &str) -> DomainResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence(format!("Store is read-only, cannot write {}", key)));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.check_writable(key)?;
        self.entries.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.check_writable(key)?;
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

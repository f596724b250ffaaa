//! SQLite Snapshot Store
//!
//! Stores the serialized list as one row of a key/value table.

use async_trait::async_trait;
use rusqlite::OptionalExtension;

use super::db::DbConn;
use super::traits::SnapshotStore;
use crate::domain::{DomainResult, Item};

/// Key the list snapshot is stored under
pub const SNAPSHOT_KEY: &str = "product-list-items";

pub struct SqliteStore {
    conn: DbConn,
}

impl SqliteStore {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Raw stored value for the key
    pub async fn raw(&self) -> DomainResult<Option<String>> {
        let conn = self.conn.lock().await;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [SNAPSHOT_KEY], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Overwrite the raw stored value
    pub async fn put_raw(&self, value: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, strftime('%s', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            [SNAPSHOT_KEY, value],
        )?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for SqliteStore {
    async fn load(&self) -> DomainResult<Vec<Item>> {
        match self.raw().await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, items: &[Item]) -> DomainResult<()> {
        let json = serde_json::to_string(items)?;
        self.put_raw(&json).await
    }
}

//! In-memory snapshot store
//!
//! Keeps the serialized snapshot in process memory. Used by tests and for
//! throwaway sessions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::SnapshotStore;
use crate::domain::{DomainError, DomainResult, Item};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary raw value, e.g. a corrupted snapshot
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// Raw stored value, if anything was saved
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self) -> DomainResult<Vec<Item>> {
        match self.raw() {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, items: &[Item]) -> DomainResult<()> {
        let json = serde_json::to_string(items)?;
        let mut guard = self
            .raw
            .lock()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        *guard = Some(json);
        Ok(())
    }
}

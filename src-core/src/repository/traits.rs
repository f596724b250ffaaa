//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for snapshot persistence.
//! Implementations can use a JSON file, SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, Item};

/// Durable home of the whole list, read and written as one unit.
///
/// All operations are async to support various backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the stored snapshot. A missing snapshot is an empty list; an
    /// unreadable one is a `Storage` error.
    async fn load(&self) -> DomainResult<Vec<Item>>;

    /// Replace the stored snapshot
    async fn save(&self, items: &[Item]) -> DomainResult<()>;
}

#[async_trait]
impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    async fn load(&self) -> DomainResult<Vec<Item>> {
        (**self).load().await
    }

    async fn save(&self, items: &[Item]) -> DomainResult<()> {
        (**self).save(items).await
    }
}

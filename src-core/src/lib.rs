//! Shopping List Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Snapshot persistence and catalog loading
//! - pricing: Price lookup providers
//! - service: The list store tying the above together

use std::time::Duration;

pub mod config;
pub mod domain;
pub mod pricing;
pub mod repository;
pub mod service;

use config::{AppConfig, PriceSource, StorageBackend};
use domain::{Catalog, DomainResult};
use pricing::{HttpPriceProvider, MockPriceProvider, PriceProvider};
use repository::{init_db, load_catalog, JsonFileStore, MemoryStore, SnapshotStore, SqliteStore};
use service::ListStore;

/// Application state shared across commands
pub struct AppState {
    pub config: AppConfig,
    pub list: ListStore<Box<dyn SnapshotStore>>,
    pub catalog: Catalog,
    pub prices: Box<dyn PriceProvider>,
}

impl AppState {
    /// Wire up storage, catalog and price provider from `config`, loading the
    /// saved list.
    pub async fn init(config: AppConfig) -> DomainResult<Self> {
        let storage = open_snapshot_store(&config)?;
        let catalog = load_catalog(config.catalog_path.as_deref()).await?;
        let prices = build_price_provider(&config.prices)?;
        let list = ListStore::open(storage).await;
        log::info!(
            "App state ready: {} items, {:?} storage",
            list.len(),
            config.storage
        );

        Ok(Self {
            config,
            list,
            catalog,
            prices,
        })
    }
}

pub fn open_snapshot_store(config: &AppConfig) -> DomainResult<Box<dyn SnapshotStore>> {
    let store: Box<dyn SnapshotStore> = match config.storage {
        StorageBackend::Json => Box::new(JsonFileStore::new(config.snapshot_path())),
        StorageBackend::Sqlite => Box::new(SqliteStore::new(init_db(&config.db_path())?)),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    Ok(store)
}

pub fn build_price_provider(source: &PriceSource) -> DomainResult<Box<dyn PriceProvider>> {
    let provider: Box<dyn PriceProvider> = match source {
        PriceSource::Mock {
            delay_ms,
            random_fallback,
        } => Box::new(
            MockPriceProvider::new()
                .with_delay(Duration::from_millis(*delay_ms))
                .with_random_fallback(*random_fallback),
        ),
        PriceSource::Http { endpoint } => Box::new(HttpPriceProvider::new(endpoint.clone())?),
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Unit;

    #[tokio::test]
    async fn test_init_with_each_backend() {
        for backend in [StorageBackend::Json, StorageBackend::Sqlite, StorageBackend::Memory] {
            let dir = tempfile::tempdir().unwrap();
            let mut config = AppConfig::with_data_dir(dir.path());
            config.storage = backend;
            config.prices = PriceSource::Mock { delay_ms: 0, random_fallback: false };

            let mut state = AppState::init(config.clone()).await.unwrap();
            assert!(state.list.is_empty());
            let milk = state.catalog.find_by_name("Milk").unwrap().clone();
            state.list.add(&milk).await;
            state.list.add_manual("Candles", "Home", 4.0, Unit::Pcs).await.unwrap();
            state.list.sync_prices(state.prices.as_ref()).await;
            assert_eq!(state.list.find_by_name("Milk").unwrap().price, Some(85.0));

            let reopened = AppState::init(config).await.unwrap();
            let expected = if backend == StorageBackend::Memory { 0 } else { 2 };
            assert_eq!(reopened.list.len(), expected);
        }
    }
}

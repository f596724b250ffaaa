//! Repository Integration Tests
//!
//! Snapshot round-trips through every store backend.

use std::path::Path;

use crate::domain::{DomainError, Item, ItemPatch, Unit};
use crate::repository::{
    init_db, load_catalog, JsonFileStore, MemoryStore, SnapshotStore, SqliteStore,
};

fn sample_items() -> Vec<Item> {
    let mut milk = Item::new("Milk", "Dairy", 2.0, Unit::L);
    milk.price = Some(85.0);
    let mut apples = Item::new("Apples", "Fruit & Vegetables", 1.5, Unit::Kg);
    apples.apply(ItemPatch::checked(true)).unwrap();
    let tea = Item::new("Tea", "", 1.0, Unit::Pack);
    vec![milk, apples, tea]
}

async fn assert_round_trip(store: &dyn SnapshotStore) {
    assert!(store.load().await.expect("Load failed").is_empty());

    let items = sample_items();
    store.save(&items).await.expect("Save failed");
    let loaded = store.load().await.expect("Load failed");
    assert_eq!(loaded, items);

    store.save(&items[..1]).await.expect("Save failed");
    assert_eq!(store.load().await.unwrap(), items[..1].to_vec());
}

/// Prices from arithmetic rarely have short decimal forms
fn computed_price_items() -> Vec<Item> {
    let mut items = Vec::new();
    for (i, factor) in [1.37, 2.0 / 3.0, 0.1 + 0.2, 1.0 / 7.0].iter().enumerate() {
        let mut item = Item::new(format!("Item {}", i), "Misc", 1.0 + factor, Unit::Kg);
        item.price = Some(119.99 * factor / 3.0);
        items.push(item);
    }
    let mut exact = Item::new("Exact", "Misc", 1.0, Unit::Pcs);
    exact.price = Some(223.30991780000002);
    items.push(exact);
    items
}

async fn assert_exact_floats(store: &dyn SnapshotStore) {
    let items = computed_price_items();
    store.save(&items).await.expect("Save failed");
    let loaded = store.load().await.expect("Load failed");
    for (saved, loaded) in items.iter().zip(&loaded) {
        assert_eq!(loaded.price.map(f64::to_bits), saved.price.map(f64::to_bits));
        assert_eq!(loaded.quantity.to_bits(), saved.quantity.to_bits());
    }
    assert_eq!(loaded, items);
}

#[tokio::test]
async fn test_computed_prices_survive_every_store() {
    assert_exact_floats(&MemoryStore::new()).await;

    let dir = tempfile::tempdir().unwrap();
    assert_exact_floats(&JsonFileStore::new(dir.path().join("items.json"))).await;

    let conn = init_db(Path::new(":memory:")).expect("Failed to init test DB");
    assert_exact_floats(&SqliteStore::new(conn)).await;
}

#[tokio::test]
async fn test_memory_store_round_trip() {
    assert_round_trip(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_json_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested").join("items.json"));
    assert_round_trip(&store).await;
    assert!(store.path().exists());
}

#[tokio::test]
async fn test_sqlite_store_round_trip() {
    let conn = init_db(Path::new(":memory:")).expect("Failed to init test DB");
    assert_round_trip(&SqliteStore::new(conn)).await;
}

#[tokio::test]
async fn test_sqlite_store_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("shopping.db");
    let items = sample_items();
    {
        let store = SqliteStore::new(init_db(&db_path).unwrap());
        store.save(&items).await.unwrap();
    }
    let reopened = SqliteStore::new(init_db(&db_path).unwrap());
    assert_eq!(reopened.load().await.unwrap(), items);
}

#[tokio::test]
async fn test_malformed_snapshot_is_storage_error() {
    let store = MemoryStore::with_raw("{not json");
    assert!(store.load().await.is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(&path, "[{\"id\": 3}]").unwrap();
    assert!(JsonFileStore::new(&path).load().await.is_err());

    let sqlite = SqliteStore::new(init_db(Path::new(":memory:")).unwrap());
    sqlite.put_raw("garbage").await.unwrap();
    assert!(sqlite.load().await.is_err());
}

#[tokio::test]
async fn test_snapshot_format() {
    let store = MemoryStore::new();
    let item = Item::new("Bread", "Bakery", 1.0, Unit::Pcs);
    store.save(std::slice::from_ref(&item)).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&store.raw().unwrap()).unwrap();
    let entry = &value[0];
    assert_eq!(entry["id"], item.id.to_string());
    assert_eq!(entry["name"], "Bread");
    assert_eq!(entry["checked"], false);
    assert!(entry.get("price").is_none());
}

#[tokio::test]
async fn test_load_catalog() {
    let builtin = load_catalog(None).await.unwrap();
    assert_eq!(builtin.entries().count(), 27);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[{"id":"x","name":"Bakery","products":[{"id":"b1","name":"Bread","category":"Bakery","unit":"pcs"}]}]"#,
    )
    .unwrap();
    let catalog = load_catalog(Some(&path)).await.unwrap();
    assert_eq!(catalog.find_by_name("Bread").unwrap().category, "Bakery");

    let missing = load_catalog(Some(&dir.path().join("missing.json"))).await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));
}

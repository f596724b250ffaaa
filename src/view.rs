//! Text rendering for the terminal

use std::fmt::Write;

use shopping_list_lib::domain::{Category, CatalogEntry, Item};
use shopping_list_lib::repository::SnapshotStore;
use shopping_list_lib::service::ListStore;

/// Characters of the id shown next to each item
const SHORT_ID_LEN: usize = 8;

pub fn short_id(item: &Item) -> String {
    item.id.to_string().chars().take(SHORT_ID_LEN).collect()
}

pub fn item_line(item: &Item) -> String {
    let mark = if item.checked { 'x' } else { ' ' };
    let mut line = format!("[{}] {}  {} {}", mark, item.name, item.quantity, item.unit);
    if let Some(price) = item.price {
        let _ = write!(line, "  {:.2} / {}", price, item.unit);
    }
    let _ = write!(line, "  ({})", short_id(item));
    line
}

/// Items grouped by category followed by the total
pub fn render_list<S: SnapshotStore>(list: &ListStore<S>) -> String {
    if list.is_empty() {
        return "Your list is empty.\n".to_string();
    }
    let mut out = String::new();
    for (category, items) in list.grouped_by_category() {
        let _ = writeln!(out, "{}", category);
        for item in items {
            let _ = writeln!(out, "  {}", item_line(item));
        }
    }
    let _ = writeln!(out, "Total: {}", list.format_total());
    out
}

pub fn render_entries(entries: &[&CatalogEntry]) -> String {
    if entries.is_empty() {
        return "Nothing found.\n".to_string();
    }
    entries
        .iter()
        .map(|entry| format!("{} ({}, {})\n", entry.name, entry.category, entry.unit))
        .collect()
}

pub fn render_catalog(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "Nothing found.\n".to_string();
    }
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{} ({})", category.name, category.entries.len());
        for entry in &category.entries {
            let _ = writeln!(out, "  {} [{}]", entry.name, entry.unit);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopping_list_lib::domain::{Catalog, ItemPatch, Unit};
    use shopping_list_lib::repository::MemoryStore;

    #[test]
    fn test_item_line() {
        let mut item = Item::new("Milk", "Dairy", 2.0, Unit::L);
        let id = short_id(&item);
        assert_eq!(item_line(&item), format!("[ ] Milk  2 l  ({})", id));

        item.apply(ItemPatch { checked: Some(true), price: Some(Some(85.0)), ..Default::default() })
            .unwrap();
        assert_eq!(item_line(&item), format!("[x] Milk  2 l  85.00 / l  ({})", id));
    }

    #[tokio::test]
    async fn test_render_list() {
        let mut list = ListStore::open(MemoryStore::new()).await;
        assert_eq!(render_list(&list), "Your list is empty.\n");

        list.add_manual("Bread", "Bakery", 1.0, Unit::Pcs).await.unwrap();
        let id = list.items()[0].id;
        list.update_by_id(id, ItemPatch::price(Some(45.5))).await.unwrap();

        let out = render_list(&list);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Bakery");
        assert!(lines[1].starts_with("  [ ] Bread  1 pcs  45.50 / pcs"));
        assert_eq!(lines[2], "Total: 45.50");
    }

    #[test]
    fn test_render_catalog() {
        let catalog = Catalog::builtin();
        let out = render_catalog(&catalog.filter("coffee"));
        assert_eq!(out, "Drinks (1)\n  Coffee [pack]\n");
        assert_eq!(render_catalog(&catalog.filter("zzz")), "Nothing found.\n");
        assert_eq!(render_entries(&catalog.search("tea")), "Tea (Drinks, pack)\n");
    }
}

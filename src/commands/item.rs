//! Item Commands
//!
//! List mutations and the list view.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use shopping_list_lib::domain::{parse_quantity, ItemId, ItemPatch, Unit, MIN_SEARCH_LEN};
use shopping_list_lib::repository::SnapshotStore;
use shopping_list_lib::service::ListStore;
use shopping_list_lib::AppState;

use super::price;
use crate::view;

/// Find the item whose id starts with `input`
pub fn resolve_id<S: SnapshotStore>(list: &ListStore<S>, input: &str) -> Result<ItemId> {
    let prefix = input.trim().to_lowercase();
    if prefix.is_empty() {
        bail!("An item id is required");
    }
    let mut matches = list
        .items()
        .iter()
        .filter(|item| item.id.to_string().starts_with(&prefix));

    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item.id),
        (None, _) => Err(anyhow!("No item with id '{}'", input)),
        (Some(_), Some(_)) => Err(anyhow!("Id '{}' matches several items, type more of it", input)),
    }
}

pub fn list(state: &AppState) {
    print!("{}", view::render_list(&state.list));
}

pub async fn add(state: &mut AppState, name: &str) -> Result<()> {
    let Some(entry) = state.catalog.find_by_name(name).cloned() else {
        let suggestions = if name.chars().count() >= MIN_SEARCH_LEN {
            state.catalog.search(name)
        } else {
            Vec::new()
        };
        if suggestions.is_empty() {
            bail!("'{}' is not in the catalog, use `new` to add it by hand", name);
        }
        let names: Vec<&str> = suggestions.iter().map(|e| e.name.as_str()).collect();
        bail!("'{}' is not in the catalog. Did you mean: {}?", name, names.join(", "));
    };

    let notice = state.list.add(&entry).await;
    println!("{}", notice);
    price::sync_after_add(state).await;
    Ok(())
}

pub async fn add_manual(
    state: &mut AppState,
    name: &str,
    category: &str,
    quantity: &str,
    unit: &str,
) -> Result<()> {
    let quantity = parse_quantity(quantity)?;
    let unit: Unit = unit.parse()?;
    let notice = state.list.add_manual(name, category, quantity, unit).await?;
    println!("{}", notice);
    price::sync_after_add(state).await;
    Ok(())
}

async fn update(state: &mut AppState, id: &str, patch: ItemPatch) -> Result<()> {
    let id = resolve_id(&state.list, id)?;
    match state.list.update_by_id(id, patch).await? {
        Some(notice) => println!("{}", notice),
        None => println!("Nothing to update"),
    }
    Ok(())
}

pub async fn set_checked(state: &mut AppState, id: &str, checked: bool) -> Result<()> {
    update(state, id, ItemPatch::checked(checked)).await
}

pub async fn set_quantity(state: &mut AppState, id: &str, quantity: &str) -> Result<()> {
    let quantity = parse_quantity(quantity)?;
    update(state, id, ItemPatch::quantity(quantity)).await
}

pub async fn set_price(state: &mut AppState, id: &str, price: Option<f64>) -> Result<()> {
    update(state, id, ItemPatch::price(price)).await
}

pub async fn remove(state: &mut AppState, id: &str) -> Result<()> {
    let id = resolve_id(&state.list, id)?;
    if let Some(notice) = state.list.remove_by_id(id).await {
        println!("{}", notice);
    }
    Ok(())
}

pub async fn clear_checked(state: &mut AppState) {
    if !state.list.has_checked() {
        println!("No bought items to remove");
        return;
    }
    let notice = state.list.clear_checked().await;
    println!("{}", notice);
}

pub async fn clear_all(state: &mut AppState, yes: bool) -> Result<()> {
    if state.list.is_empty() {
        println!("Your list is empty.");
        return Ok(());
    }
    let confirmed = yes || confirm(state.list.len()).context("Failed to read confirmation")?;
    match state.list.clear_all(|_| confirmed).await {
        Some(notice) => println!("{}", notice),
        None => println!("Cancelled"),
    }
    Ok(())
}

/// Ask on the terminal before wiping the list
fn confirm(count: usize) -> io::Result<bool> {
    print!("Remove all {} items from the list? [y/N] ", count);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

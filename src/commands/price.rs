//! Price Commands

use anyhow::{Context, Result};
use shopping_list_lib::AppState;

/// Explicit refresh: failures are reported
pub async fn refresh(state: &mut AppState) -> Result<()> {
    if state.list.is_empty() {
        println!("Your list is empty.");
        return Ok(());
    }
    println!("Updating prices...");
    let notice = state
        .list
        .refresh_prices(state.prices.as_ref())
        .await
        .context("Could not update prices")?;
    if let Some(notice) = notice {
        println!("{}", notice);
        println!("Total: {}", state.list.format_total());
    }
    Ok(())
}

/// Background sync after an item was added; failures only reach the log
pub async fn sync_after_add(state: &mut AppState) {
    if state.list.sync_prices(state.prices.as_ref()).await {
        log::debug!("Prices synced after add, total {}", state.list.format_total());
    }
}

//! List Store
//!
//! Sole owner of the items on the shopping list. Every mutation is followed by
//! a full snapshot write to the injected [`SnapshotStore`].
//!
//! Items are kept in insertion order for display, with a name index on the
//! side for the merge-by-name add path.

use std::collections::{HashMap, HashSet};

use crate::domain::{
    validate_name, validate_quantity, CatalogEntry, DomainError, DomainResult, Item, ItemId,
    ItemPatch, Notice, Unit,
};
use crate::pricing::{PriceMap, PriceProvider};
use crate::repository::SnapshotStore;

/// Group label for items without a category
pub const UNCATEGORIZED: &str = "Other";

/// How fetched prices are merged into the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMerge {
    /// Explicit refresh: a name missing from the result loses its price
    Replace,
    /// Background sync: a name missing from the result keeps its old price
    KeepExisting,
}

/// One outstanding price lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    token: u64,
    names: Vec<String>,
}

impl PriceRequest {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Distinct item names, in list order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

pub struct ListStore<S: SnapshotStore> {
    items: Vec<Item>,
    /// name -> index of the first item with that name
    by_name: HashMap<String, usize>,
    storage: S,
    /// Last token handed out by `begin_price_request`
    issued_token: u64,
    /// Token of the newest price result merged so far
    applied_token: u64,
}

impl<S: SnapshotStore> ListStore<S> {
    /// Load the stored snapshot. An unreadable snapshot starts an empty list.
    pub async fn open(storage: S) -> Self {
        let items = match storage.load().await.and_then(check_snapshot) {
            Ok(items) => items,
            Err(e) => {
                log::error!("Error loading saved list, starting empty: {}", e);
                Vec::new()
            }
        };
        log::debug!("Loaded {} items", items.len());

        let mut store = Self {
            items,
            by_name: HashMap::new(),
            storage,
            issued_token: 0,
            applied_token: 0,
        };
        store.reindex();
        store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// First item with exactly this name
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.by_name.get(name).map(|&index| &self.items[index])
    }

    pub fn has_checked(&self) -> bool {
        self.items.iter().any(|item| item.checked)
    }

    // ========================
    // Mutations
    // ========================

    /// Add a catalog product. If an item with the same name is already on the
    /// list its quantity goes up by one and nothing else changes.
    pub async fn add(&mut self, candidate: &CatalogEntry) -> Notice {
        let existing = self.by_name.get(&candidate.name).copied();
        let notice = match existing {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity += 1.0;
                Notice::QuantityUpdated {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit: item.unit,
                }
            }
            None => {
                self.push(Item::new(
                    candidate.name.clone(),
                    candidate.category.clone(),
                    1.0,
                    candidate.unit,
                ));
                Notice::Added {
                    name: candidate.name.clone(),
                }
            }
        };
        self.persist().await;
        notice
    }

    /// Add an item typed in by hand. Always appends, even when the name is
    /// already on the list.
    pub async fn add_manual(
        &mut self,
        name: &str,
        category: &str,
        quantity: f64,
        unit: Unit,
    ) -> DomainResult<Notice> {
        let name = validate_name(name)?;
        let quantity = validate_quantity(quantity)?;

        self.push(Item::new(name.clone(), category, quantity, unit));
        self.persist().await;
        Ok(Notice::Added { name })
    }

    /// Apply `patch` to the item with `id`. Returns `Ok(None)` when there is
    /// no such item; an invalid patch changes nothing.
    pub async fn update_by_id(&mut self, id: ItemId, patch: ItemPatch) -> DomainResult<Option<Notice>> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        let renamed = patch.name.is_some();
        item.apply(patch)?;
        let notice = Notice::Updated {
            name: item.name.clone(),
        };

        if renamed {
            self.reindex();
        }
        self.persist().await;
        Ok(Some(notice))
    }

    pub async fn remove_by_id(&mut self, id: ItemId) -> Option<Notice> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.items.remove(index);
        self.reindex();
        self.persist().await;
        Some(Notice::Removed)
    }

    /// Drop every checked item
    pub async fn clear_checked(&mut self) -> Notice {
        let before = self.items.len();
        self.items.retain(|item| !item.checked);
        let removed = before - self.items.len();
        self.reindex();
        self.persist().await;
        Notice::CheckedCleared { removed }
    }

    /// Empty the list if `confirm`, called with the current item count,
    /// agrees.
    pub async fn clear_all<F>(&mut self, confirm: F) -> Option<Notice>
    where
        F: FnOnce(usize) -> bool,
    {
        if !confirm(self.items.len()) {
            log::debug!("Clear all declined");
            return None;
        }
        self.items.clear();
        self.by_name.clear();
        self.persist().await;
        Some(Notice::ListCleared)
    }

    // ========================
    // Prices
    // ========================

    /// Snapshot the current names for a lookup. `None` for an empty list.
    pub fn begin_price_request(&mut self) -> Option<PriceRequest> {
        if self.items.is_empty() {
            return None;
        }
        let mut names: Vec<String> = Vec::with_capacity(self.by_name.len());
        for item in &self.items {
            if !names.contains(&item.name) {
                names.push(item.name.clone());
            }
        }
        self.issued_token += 1;
        Some(PriceRequest {
            token: self.issued_token,
            names,
        })
    }

    /// Merge the result of `request` into the list by name. Results older
    /// than one already merged are discarded and `false` is returned.
    pub async fn apply_prices(&mut self, request: &PriceRequest, prices: &PriceMap, merge: PriceMerge) -> bool {
        if request.token <= self.applied_token {
            log::warn!(
                "Discarding stale price result #{} (already applied #{})",
                request.token,
                self.applied_token
            );
            return false;
        }
        self.applied_token = request.token;

        for item in &mut self.items {
            if !request.names.contains(&item.name) {
                continue;
            }
            let fetched = prices
                .get(&item.name)
                .copied()
                .filter(|price| price.is_finite() && *price >= 0.0);
            match (merge, fetched) {
                (_, Some(price)) => item.price = Some(price),
                (PriceMerge::Replace, None) => item.price = None,
                (PriceMerge::KeepExisting, None) => {}
            }
        }
        self.persist().await;
        true
    }

    /// Explicit refresh. Every item's price is overwritten with the fetched
    /// value, or cleared when the provider has none. A failed lookup leaves
    /// prices untouched and is returned to the caller.
    pub async fn refresh_prices<P>(&mut self, provider: &P) -> DomainResult<Option<Notice>>
    where
        P: PriceProvider + ?Sized,
    {
        let Some(request) = self.begin_price_request() else {
            return Ok(None);
        };
        let prices = provider.fetch_prices(request.names()).await.map_err(|e| {
            log::error!("Failed to refresh prices: {}", e);
            e
        })?;
        self.apply_prices(&request, &prices, PriceMerge::Replace).await;
        Ok(Some(Notice::PricesUpdated))
    }

    /// Background sync. Fetched prices are merged in, old prices survive for
    /// names the provider has nothing for, and failures are only logged.
    /// Returns whether a result was merged.
    pub async fn sync_prices<P>(&mut self, provider: &P) -> bool
    where
        P: PriceProvider + ?Sized,
    {
        let Some(request) = self.begin_price_request() else {
            return false;
        };
        match provider.fetch_prices(request.names()).await {
            Ok(prices) => self.apply_prices(&request, &prices, PriceMerge::KeepExisting).await,
            Err(e) => {
                log::warn!("Failed to update prices: {}", e);
                false
            }
        }
    }

    // ========================
    // Totals & grouping
    // ========================

    /// Sum of `price * quantity` over priced items
    pub fn total(&self) -> f64 {
        // `+ 0.0` turns a `-0.0` sum into `0.0`
        self.items.iter().filter_map(Item::line_total).sum::<f64>() + 0.0
    }

    pub fn format_total(&self) -> String {
        format!("{:.2}", self.total())
    }

    /// Items grouped by category, groups in order of first appearance
    pub fn grouped_by_category(&self) -> Vec<(&str, Vec<&Item>)> {
        let mut groups: Vec<(&str, Vec<&Item>)> = Vec::new();
        for item in &self.items {
            let label = if item.category.is_empty() {
                UNCATEGORIZED
            } else {
                item.category.as_str()
            };
            match groups.iter_mut().find(|(name, _)| *name == label) {
                Some((_, members)) => members.push(item),
                None => groups.push((label, vec![item])),
            }
        }
        groups
    }

    // ========================
    // Internals
    // ========================

    fn push(&mut self, item: Item) {
        self.by_name.entry(item.name.clone()).or_insert(self.items.len());
        self.items.push(item);
    }

    fn reindex(&mut self) {
        self.by_name.clear();
        for (index, item) in self.items.iter().enumerate() {
            self.by_name.entry(item.name.clone()).or_insert(index);
        }
    }

    async fn persist(&self) {
        if let Err(e) = self.storage.save(&self.items).await {
            log::error!("Failed to save shopping list: {}", e);
        }
    }
}

/// Reject a loaded snapshot holding an invalid item or a repeated id
fn check_snapshot(items: Vec<Item>) -> DomainResult<Vec<Item>> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        item.validate()?;
        if !seen.insert(item.id) {
            return Err(DomainError::Storage(format!("duplicate item id {}", item.id)));
        }
    }
    Ok(items)
}

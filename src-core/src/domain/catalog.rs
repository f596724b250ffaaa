//! Catalog Entities
//!
//! Static reference data: categories of products that can be added to the
//! list. Loaded once, never mutated.

use serde::{Deserialize, Serialize};

use super::error::DomainResult;
use super::item::Unit;

/// Shortest query the search box reacts to. Enforced by callers.
pub const MIN_SEARCH_LEN: usize = 2;

/// A product definition without list state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: Unit,
}

impl CatalogEntry {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "products")]
    pub entries: Vec<CatalogEntry>,
}

/// Immutable product catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Parse a catalog from its JSON form (an array of categories)
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Ok(Self::new(categories))
    }

    /// Embedded default catalog
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(id, name, products)| Category {
                id: id.to_string(),
                name: name.to_string(),
                entries: products
                    .iter()
                    .map(|(pid, pname, unit)| CatalogEntry {
                        id: pid.to_string(),
                        name: pname.to_string(),
                        category: name.to_string(),
                        unit: *unit,
                    })
                    .collect(),
            })
            .collect();
        Self::new(categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// All entries in catalog order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    /// Exact, case-sensitive lookup
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries().find(|entry| entry.name == name)
    }

    /// Case-insensitive substring search over entry names, in catalog order.
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.entries().filter(|entry| entry.matches(&needle)).collect()
    }

    /// Categories narrowed to matching entries, dropping categories left
    /// empty. A blank query returns the whole catalog.
    pub fn filter(&self, query: &str) -> Vec<Category> {
        if query.trim().is_empty() {
            return self.categories.clone();
        }
        let needle = query.to_lowercase();
        self.categories
            .iter()
            .filter_map(|category| {
                let entries: Vec<CatalogEntry> = category
                    .entries
                    .iter()
                    .filter(|entry| entry.matches(&needle))
                    .cloned()
                    .collect();
                (!entries.is_empty()).then(|| Category {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    entries,
                })
            })
            .collect()
    }
}

type BuiltinCategory = (&'static str, &'static str, &'static [(&'static str, &'static str, Unit)]);

const BUILTIN: &[BuiltinCategory] = &[
    (
        "cat-1",
        "Fruit & Vegetables",
        &[
            ("p-1", "Apples", Unit::Kg),
            ("p-2", "Bananas", Unit::Kg),
            ("p-3", "Cucumbers", Unit::Kg),
            ("p-4", "Tomatoes", Unit::Kg),
            ("p-5", "Potatoes", Unit::Kg),
            ("p-6", "Carrots", Unit::Kg),
            ("p-7", "Onions", Unit::Kg),
        ],
    ),
    (
        "cat-2",
        "Dairy",
        &[
            ("p-8", "Milk", Unit::L),
            ("p-9", "Cheese", Unit::Kg),
            ("p-10", "Yogurt", Unit::Pcs),
            ("p-11", "Cottage Cheese", Unit::Kg),
            ("p-12", "Sour Cream", Unit::Pcs),
        ],
    ),
    (
        "cat-3",
        "Meat & Fish",
        &[
            ("p-13", "Chicken", Unit::Kg),
            ("p-14", "Beef", Unit::Kg),
            ("p-15", "Pork", Unit::Kg),
            ("p-16", "Salmon", Unit::Kg),
            ("p-17", "Cod", Unit::Kg),
        ],
    ),
    (
        "cat-4",
        "Groceries",
        &[
            ("p-18", "Rice", Unit::Kg),
            ("p-19", "Pasta", Unit::Kg),
            ("p-20", "Buckwheat", Unit::Kg),
            ("p-21", "Flour", Unit::Kg),
            ("p-22", "Sugar", Unit::Kg),
            ("p-23", "Salt", Unit::Kg),
        ],
    ),
    (
        "cat-5",
        "Drinks",
        &[
            ("p-24", "Water", Unit::L),
            ("p-25", "Juice", Unit::L),
            ("p-26", "Tea", Unit::Pack),
            ("p-27", "Coffee", Unit::Pack),
        ],
    ),
];

//! Item Entity
//!
//! A single entry on the shopping list: what to buy, how much, and whether it
//! has been bought already.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{DomainError, DomainResult};

/// Opaque unique identifier of a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::InvalidInput(format!("bad item id '{}': {}", s, e)))
    }
}

/// Unit of measure for a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Pieces
    #[default]
    Pcs,
    Kg,
    G,
    L,
    Ml,
    Pack,
}

impl Unit {
    pub const ALL: [Unit; 6] = [Unit::Pcs, Unit::Kg, Unit::G, Unit::L, Unit::Ml, Unit::Pack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pcs => "pcs",
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "l",
            Unit::Ml => "ml",
            Unit::Pack => "pack",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == wanted)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown unit '{}'", s)))
    }
}

/// A shopping list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Product name, trimmed and non-empty
    pub name: String,
    /// Category label used for grouping
    pub category: String,
    /// Last known price per unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Amount to buy, always positive
    pub quantity: f64,
    /// Purchased flag
    pub checked: bool,
    pub unit: Unit,
}

impl Item {
    /// Create an unchecked, unpriced item with a fresh id
    pub fn new(name: impl Into<String>, category: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            category: category.into(),
            price: None,
            quantity,
            checked: false,
            unit,
        }
    }

    /// Price for the whole quantity, if the item is priced
    pub fn line_total(&self) -> Option<f64> {
        self.price.map(|price| price * self.quantity)
    }

    /// Check the invariants a stored item must hold
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_quantity(self.quantity)?;
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Apply a partial update. The patch is validated as a whole first, so a
    /// rejected patch leaves every field as it was.
    pub fn apply(&mut self, patch: ItemPatch) -> DomainResult<()> {
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(Some(price)) = patch.price {
            validate_price(price)?;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(checked) = patch.checked {
            self.checked = checked;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        Ok(())
    }
}

/// Partial update for an item; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    /// `Some(None)` clears the price
    pub price: Option<Option<f64>>,
    pub quantity: Option<f64>,
    pub checked: Option<bool>,
    pub unit: Option<Unit>,
}

impl ItemPatch {
    pub fn checked(checked: bool) -> Self {
        Self { checked: Some(checked), ..Default::default() }
    }

    pub fn quantity(quantity: f64) -> Self {
        Self { quantity: Some(quantity), ..Default::default() }
    }

    pub fn price(price: Option<f64>) -> Self {
        Self { price: Some(price), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ========================
// Validation
// ========================

/// Trimmed, non-empty product name
pub fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput("product name is required".to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn validate_quantity(quantity: f64) -> DomainResult<f64> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "quantity must be a positive number, got {}",
            quantity
        )));
    }
    Ok(quantity)
}

pub fn validate_price(price: f64) -> DomainResult<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(price)
}

/// Parse a quantity typed by the user
pub fn parse_quantity(input: &str) -> DomainResult<f64> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::InvalidInput(format!("'{}' is not a valid quantity", input)))?;
    validate_quantity(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = Item::new("Milk", "Dairy", 1.0, Unit::L);
        assert_eq!(item.name, "Milk");
        assert!(!item.checked);
        assert!(item.price.is_none());
        assert_ne!(item.id, Item::new("Milk", "Dairy", 1.0, Unit::L).id);
    }

    #[test]
    fn test_unit_serialization() {
        assert_eq!(Unit::Pack.as_str(), "pack");
        assert_eq!("KG".parse::<Unit>().unwrap(), Unit::Kg);
        assert!("bushel".parse::<Unit>().is_err());
        assert_eq!(serde_json::to_string(&Unit::Ml).unwrap(), "\"ml\"");
    }

    #[test]
    fn test_price_omitted_when_absent() {
        let item = Item::new("Bread", "Bakery", 2.0, Unit::Pcs);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("price").is_none());
        assert_eq!(json["quantity"], 2.0);
        assert_eq!(json["unit"], "pcs");
    }

    #[test]
    fn test_line_total() {
        let mut item = Item::new("Apples", "Fruit", 1.5, Unit::Kg);
        assert_eq!(item.line_total(), None);
        item.price = Some(120.0);
        assert_eq!(item.line_total(), Some(180.0));
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut item = Item::new("Rice", "Groceries", 1.0, Unit::Kg);
        item.price = Some(95.0);
        item.apply(ItemPatch::checked(true)).unwrap();
        assert!(item.checked);
        assert_eq!(item.price, Some(95.0));
        assert_eq!(item.quantity, 1.0);

        item.apply(ItemPatch::price(None)).unwrap();
        assert_eq!(item.price, None);
    }

    #[test]
    fn test_invalid_patch_leaves_item_unchanged() {
        let mut item = Item::new("Rice", "Groceries", 2.0, Unit::Kg);
        let before = item.clone();
        let patch = ItemPatch {
            checked: Some(true),
            quantity: Some(0.0),
            ..Default::default()
        };
        assert!(item.apply(patch).is_err());
        assert_eq!(item, before);

        assert!(item.apply(ItemPatch { name: Some("   ".to_string()), ..Default::default() }).is_err());
        assert!(item.apply(ItemPatch::price(Some(-1.0))).is_err());
        assert_eq!(item, before);
    }

    #[test]
    fn test_validate_stored_item() {
        let mut item = Item::new("Milk", "Dairy", 1.0, Unit::L);
        item.price = Some(0.0);
        assert!(item.validate().is_ok());

        item.quantity = -3.0;
        assert!(item.validate().unwrap_err().is_validation());
        item.quantity = 1.0;
        item.price = Some(-10.0);
        assert!(item.validate().is_err());
        item.price = None;
        item.name = "  ".to_string();
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 2.5 ").unwrap(), 2.5);
        assert!(parse_quantity("abc").is_err());
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-3").is_err());
        assert!(parse_quantity("NaN").is_err());
        assert!(parse_quantity("inf").is_err());
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Tea ").unwrap(), "Tea");
        assert!(validate_name("\t").is_err());
    }
}

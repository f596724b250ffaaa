//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage or network dependencies.

mod catalog;
mod error;
mod item;
mod notice;

pub use catalog::{Catalog, CatalogEntry, Category, MIN_SEARCH_LEN};
pub use error::{DomainError, DomainResult};
pub use item::{
    parse_quantity, validate_name, validate_price, validate_quantity, Item, ItemId, ItemPatch, Unit,
};
pub use notice::Notice;

//! Service Layer
//!
//! Stateful list management on top of the repository and pricing seams.

mod list_store;


pub use list_store::{ListStore, PriceMerge, PriceRequest, UNCATEGORIZED};

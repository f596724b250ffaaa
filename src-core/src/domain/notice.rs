//! User-visible notifications produced by list mutations.

use std::fmt;

use super::item::Unit;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Added { name: String },
    QuantityUpdated { name: String, quantity: f64, unit: Unit },
    Updated { name: String },
    Removed,
    CheckedCleared { removed: usize },
    ListCleared,
    PricesUpdated,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Added { name } => write!(f, "{} added to the list", name),
            Notice::QuantityUpdated { name, quantity, unit } => {
                write!(f, "{} is now {} {}", name, quantity, unit)
            }
            Notice::Updated { name } => write!(f, "{} updated", name),
            Notice::Removed => write!(f, "Item removed from the list"),
            Notice::CheckedCleared { removed } => {
                write!(f, "Purchased items removed from the list ({})", removed)
            }
            Notice::ListCleared => write!(f, "All items removed from the list"),
            Notice::PricesUpdated => write!(f, "Current prices loaded"),
        }
    }
}

//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shopping-list")]
#[command(about = "Keep a shopping list with prices and a running total", long_about = None)]
pub struct Cli {
    /// Directory holding the list, config and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the list grouped by category, with the total
    List,

    /// Add a catalog product (adds one more if it is already listed)
    Add {
        /// Exact catalog product name
        name: String,
    },

    /// Add an item by hand
    New {
        name: String,
        #[arg(long, short = 'c', default_value = "")]
        category: String,
        #[arg(long, short = 'q', default_value = "1")]
        quantity: String,
        /// pcs, kg, g, l, ml or pack
        #[arg(long, short = 'u', default_value = "pcs")]
        unit: String,
    },

    /// Search the catalog by name
    Search { query: String },

    /// Browse the catalog, optionally filtered
    Catalog {
        #[arg(long, short = 'q')]
        query: Option<String>,
    },

    /// Mark an item as bought
    Check {
        /// Item id or a unique prefix of it
        id: String,
    },

    /// Mark an item as not bought
    Uncheck { id: String },

    /// Change an item's quantity
    SetQuantity { id: String, quantity: String },

    /// Set an item's price, or clear it when no price is given
    SetPrice { id: String, price: Option<f64> },

    /// Remove an item
    Remove { id: String },

    /// Remove all bought items
    ClearChecked,

    /// Remove every item
    ClearAll {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Fetch current prices for every item
    RefreshPrices,

    /// Print the end of the log file
    Logs {
        #[arg(long, short = 'n', default_value_t = 50)]
        lines: usize,

        /// Only show lines logged by this run, from memory
        #[arg(long)]
        session: bool,
    },
}

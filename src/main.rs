//! Shopping List CLI Entry Point

mod cli;
mod commands;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use rolling_logger::LoggerConfig;
use shopping_list_lib::config::AppConfig;
use shopping_list_lib::AppState;

use cli::Cli;

/// Log file name stem
pub const LOG_NAME: &str = "ShoppingList";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.data_dir.as_deref()).context("Failed to load configuration")?;

    let logger_config = LoggerConfig {
        max_bytes: config.max_log_bytes,
        ..Default::default()
    };
    if let Err(e) = rolling_logger::init_logger_with(config.log_dir(), LOG_NAME, logger_config) {
        eprintln!("Logging disabled: {}", e);
    }

    let mut state = AppState::init(config)
        .await
        .context("Failed to open shopping list")?;

    let _ = rolling_logger::info(&format!("Running with {} items", state.list.len()));

    let result = commands::run(&mut state, cli.command).await;
    if let Err(e) = &result {
        let _ = rolling_logger::error(&format!("Command failed: {:#}", e));
    }
    result
}

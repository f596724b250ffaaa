//! Command Handlers
//!
//! One handler per CLI verb, organized by domain.

mod catalog;
mod item;
mod price;

use anyhow::Result;
use shopping_list_lib::AppState;

use crate::cli::Command;

pub async fn run(state: &mut AppState, command: Command) -> Result<()> {
    match command {
        Command::List => item::list(state),
        Command::Add { name } => item::add(state, &name).await?,
        Command::New { name, category, quantity, unit } => {
            item::add_manual(state, &name, &category, &quantity, &unit).await?
        }
        Command::Search { query } => catalog::search(state, &query),
        Command::Catalog { query } => catalog::browse(state, query.as_deref()),
        Command::Check { id } => item::set_checked(state, &id, true).await?,
        Command::Uncheck { id } => item::set_checked(state, &id, false).await?,
        Command::SetQuantity { id, quantity } => item::set_quantity(state, &id, &quantity).await?,
        Command::SetPrice { id, price } => item::set_price(state, &id, price).await?,
        Command::Remove { id } => item::remove(state, &id).await?,
        Command::ClearChecked => item::clear_checked(state).await,
        Command::ClearAll { yes } => item::clear_all(state, yes).await?,
        Command::RefreshPrices => price::refresh(state).await?,
        Command::Logs { lines, session } => {
            for line in log_lines(state, lines, session)? {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Last `lines` lines of the log file, or of this run's in-memory buffer
fn log_lines(state: &AppState, lines: usize, session: bool) -> Result<Vec<String>> {
    if session {
        let recent = rolling_logger::recent_lines();
        let start = recent.len().saturating_sub(lines);
        return Ok(recent[start..].to_vec());
    }
    let path = rolling_logger::log_file_path(state.config.log_dir(), crate::LOG_NAME);
    Ok(rolling_logger::tail(&path, lines)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopping_list_lib::config::{AppConfig, StorageBackend};

    #[tokio::test]
    async fn test_log_lines_reads_file_tail() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::with_data_dir(dir.path());
        config.storage = StorageBackend::Memory;
        let state = AppState::init(config).await.unwrap();

        let log_dir = state.config.log_dir();
        std::fs::create_dir_all(&log_dir).unwrap();
        std::fs::write(rolling_logger::log_file_path(&log_dir, crate::LOG_NAME), "one\ntwo\nthree\n").unwrap();

        assert_eq!(log_lines(&state, 2, false).unwrap(), vec!["two", "three"]);
        // No logger is installed in tests, so this run has nothing buffered
        assert!(log_lines(&state, 2, true).unwrap().is_empty());
    }
}

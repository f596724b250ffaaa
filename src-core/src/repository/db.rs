//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations for the SQLite-backed
//! snapshot store.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::Storage(err.to_string())
    }
}

/// Shared connection handle
pub type DbConn = Arc<Mutex<Connection>>;

/// Open (or create) the database at `db_path` and run migrations.
/// `:memory:` opens a private in-memory database.
pub fn init_db(db_path: &Path) -> DomainResult<DbConn> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()?
    } else {
        if let Some(dir) = db_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        Connection::open(db_path)?
    };

    run_migrations(&conn)?;
    log::debug!("Database ready at {}", db_path.display());

    Ok(Arc::new(Mutex::new(conn)))
}

/// Check if a table exists
fn table_exists(conn: &Connection, table: &str) -> DomainResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    if !table_exists(conn, "kv")? {
        conn.execute(
            "CREATE TABLE kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )",
            (),
        )?;
        log::info!("Created kv table");
    }

    Ok(())
}

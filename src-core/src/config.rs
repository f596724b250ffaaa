//! Application Configuration
//!
//! Read from `config.json` in the data directory. Every field has a default,
//! so a missing file or a partial one is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "SHOPPING_LIST_DATA_DIR";
pub const CONFIG_FILE: &str = "config.json";

/// Where the list snapshot is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `items.json` in the data directory
    #[default]
    Json,
    /// `shopping_list.db` in the data directory
    Sqlite,
    /// Nothing survives the process
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PriceSource {
    Mock {
        #[serde(default = "default_delay_ms")]
        delay_ms: u64,
        #[serde(default = "default_true")]
        random_fallback: bool,
    },
    Http {
        endpoint: String,
    },
}

impl Default for PriceSource {
    fn default() -> Self {
        PriceSource::Mock {
            delay_ms: default_delay_ms(),
            random_fallback: true,
        }
    }
}

fn default_delay_ms() -> u64 {
    800
}

fn default_true() -> bool {
    true
}

fn default_max_log_bytes() -> u64 {
    1024 * 1024
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Resolved at load time, never read from the file
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default)]
    pub prices: PriceSource,
    /// JSON catalog to use instead of the builtin one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Defaults to `logs/` under the data directory
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_max_log_bytes")]
    pub max_log_bytes: u64,
}

impl AppConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage: StorageBackend::default(),
            prices: PriceSource::default(),
            catalog_path: None,
            log_dir: None,
            max_log_bytes: default_max_log_bytes(),
        }
    }

    /// Resolve the data directory (explicit > env > platform default) and
    /// read its config file if there is one.
    pub fn load(explicit_dir: Option<&Path>) -> DomainResult<Self> {
        let data_dir = resolve_data_dir(explicit_dir)?;
        Self::load_from(data_dir)
    }

    pub fn load_from(data_dir: PathBuf) -> DomainResult<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let mut config = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<AppConfig>(&raw).map_err(|e| {
                DomainError::InvalidInput(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::with_data_dir(&data_dir),
            Err(e) => return Err(e.into()),
        };
        config.data_dir = data_dir;
        Ok(config)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("items.json")
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("shopping_list.db")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }
}

fn resolve_data_dir(explicit_dir: Option<&Path>) -> DomainResult<PathBuf> {
    if let Some(dir) = explicit_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join("shopping-list"))
        .ok_or_else(|| DomainError::Internal("no data directory available".to_string()))
}

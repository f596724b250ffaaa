//! Catalog loading from a JSON file

use std::path::Path;

use crate::domain::{Catalog, DomainError, DomainResult};

/// Load the catalog from `path`, or the builtin one when no path is given
pub async fn load_catalog(path: Option<&Path>) -> DomainResult<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DomainError::NotFound(format!("catalog file {}", path.display())));
        }
        Err(e) => return Err(e.into()),
    };
    let catalog = Catalog::from_json(&raw)?;
    log::info!(
        "Loaded catalog from {} ({} categories)",
        path.display(),
        catalog.categories().len()
    );
    Ok(catalog)
}

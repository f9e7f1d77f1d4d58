//! # Catalog State
//!
//! The product catalog, loaded once at startup and shared read-only.

use std::path::Path;
use std::sync::Arc;

use storefront_core::Catalog;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::ConfigState;

/// Catalog compiled into the binary.
const BUNDLED_CATALOG: &str = include_str!("../../fixtures/products.json");

/// Shared handle to the read-only catalog.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// The fixture shipped with the shell.
    pub fn bundled() -> AppResult<Self> {
        Ok(Self::new(Catalog::from_json(BUNDLED_CATALOG)?))
    }

    /// Reads and validates a catalog file.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::catalog(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        Ok(Self::new(Catalog::from_json(&json)?))
    }

    /// `catalog_path` from the config if set, else the bundled fixture.
    pub fn load(config: &ConfigState) -> AppResult<Self> {
        let state = match &config.catalog_path {
            Some(path) => Self::from_path(path)?,
            None => Self::bundled()?,
        };
        info!(
            products = state.catalog.len(),
            source = ?config.catalog_path,
            "Catalog loaded"
        );
        Ok(state)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

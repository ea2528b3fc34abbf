//! Shared state handed to every tool handler.

use crate::assets::{AssetResolver, TemplateResolver};
use crate::config::Config;
use crate::dataset::{Catalog, CatalogState};
use crate::pins::PinStore;
use crate::storage::FileStorage;
use std::sync::Arc;

/// Process-wide handles: the catalog, pin storage, asset resolution and config.
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct CodexContext {
    catalog: Arc<CatalogState>,
    pins: PinStore<FileStorage>,
    assets: Arc<dyn AssetResolver>,
    config: Arc<Config>,
}

impl std::fmt::Debug for CodexContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodexContext")
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CodexContext {
    /// Builds the context from `config` around a shared, possibly unloaded catalog.
    pub fn with_catalog(config: Config, catalog: Arc<CatalogState>) -> Self {
        let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
        Self {
            catalog,
            pins: PinStore::new(storage),
            assets: Arc::new(TemplateResolver::new(config.assets.clone())),
            config: Arc::new(config),
        }
    }

    pub fn catalog_state(&self) -> &Arc<CatalogState> {
        &self.catalog
    }

    /// The current catalog; empty until the dataset has loaded.
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.catalog.catalog().await
    }

    pub fn pins(&self) -> &PinStore<FileStorage> {
        &self.pins
    }

    pub fn assets(&self) -> &dyn AssetResolver {
        self.assets.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

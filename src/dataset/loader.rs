//! Deferred, best-effort loading of the bundled dataset.
//!
//! Loading never blocks callers and never surfaces an error: until a load
//! succeeds every consumer sees an empty catalog.

use super::catalog::Catalog;
use crate::error::LoadError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use xxhash_rust::xxh3::xxh3_64;

/// Externally visible load state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loading,
    Loaded {
        gods: usize,
        items: usize,
        fingerprint: u64,
    },
    Failed(String),
}

#[derive(Debug)]
enum LoadState {
    NotLoaded,
    Loading,
    Loaded(Arc<Catalog>),
    Failed(String),
}

/// Process-wide handle to the current catalog.
///
/// Populated by [`load`](Self::load); read-only for everyone else.
#[derive(Debug)]
pub struct CatalogState {
    state: RwLock<LoadState>,
    empty: Arc<Catalog>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LoadState::NotLoaded),
            empty: Arc::new(Catalog::empty()),
        }
    }

    /// A state that starts out loaded with `catalog`.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            state: RwLock::new(LoadState::Loaded(Arc::new(catalog))),
            empty: Arc::new(Catalog::empty()),
        }
    }

    /// The current catalog, or an empty one when nothing is loaded.
    pub async fn catalog(&self) -> Arc<Catalog> {
        match &*self.state.read().await {
            LoadState::Loaded(catalog) => catalog.clone(),
            _ => self.empty.clone(),
        }
    }

    pub async fn status(&self) -> LoadStatus {
        match &*self.state.read().await {
            LoadState::NotLoaded => LoadStatus::NotLoaded,
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Loaded(catalog) => LoadStatus::Loaded {
                gods: catalog.gods().len(),
                items: catalog.items().len(),
                fingerprint: catalog.fingerprint(),
            },
            LoadState::Failed(reason) => LoadStatus::Failed(reason.clone()),
        }
    }

    /// Loads (or reloads) the dataset at `path`. Returns whether a catalog is available.
    ///
    /// Byte-identical data keeps the current catalog and its index. A failed
    /// reload keeps serving the previous catalog.
    pub async fn load(&self, path: &Path) -> bool {
        {
            let mut state = self.state.write().await;
            if !matches!(*state, LoadState::Loaded(_)) {
                *state = LoadState::Loading;
            }
        }

        let result = read_catalog(path, self.current_fingerprint().await).await;

        let mut state = self.state.write().await;
        match result {
            Ok(Some(catalog)) => {
                *state = LoadState::Loaded(Arc::new(catalog));
                true
            }
            Ok(None) => {
                tracing::debug!("Dataset at {} unchanged, keeping catalog", path.display());
                true
            }
            Err(e) => {
                if matches!(*state, LoadState::Loaded(_)) {
                    tracing::warn!("{}; keeping previously loaded dataset", e);
                    true
                } else {
                    tracing::warn!("{}; catalog stays empty", e);
                    *state = LoadState::Failed(e.to_string());
                    false
                }
            }
        }
    }

    /// Starts [`load`](Self::load) in the background.
    pub fn spawn_load(self: &Arc<Self>, path: PathBuf) -> tokio::task::JoinHandle<bool> {
        let state = self.clone();
        tokio::spawn(async move { state.load(&path).await })
    }

    async fn current_fingerprint(&self) -> Option<u64> {
        match &*self.state.read().await {
            LoadState::Loaded(catalog) => Some(catalog.fingerprint()),
            _ => None,
        }
    }
}

/// Reads and normalizes a dataset file.
///
/// Returns `Ok(None)` when the bytes hash to `known_fingerprint`.
pub async fn read_catalog(
    path: &Path,
    known_fingerprint: Option<u64>,
) -> Result<Option<Catalog>, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if known_fingerprint == Some(xxh3_64(&bytes)) {
        return Ok(None);
    }

    tracing::info!("Loading dataset from {} ({} bytes)", path.display(), bytes.len());

    // Parsing and normalization are CPU bound
    let owned_path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        Catalog::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: owned_path,
            source,
        })
    })
    .await
    .map_err(|e| LoadError::Task(e.to_string()))?
    .map(Some)
}

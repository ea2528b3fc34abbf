//! Shared test fixtures and utilities for integration tests.
#![allow(dead_code)] // Fixtures are shared across integration test crates
//!
//! Every fixture reads the small dataset in `tests/fixtures/builds.json` and
//! gets its own temporary directory for pin storage, so tests never share
//! persisted state.

use pantheon_codex::config::AssetTemplates;
use pantheon_codex::{Catalog, CatalogState, CodexContext, Config};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Path of the fixture dataset.
pub fn dataset_path() -> PathBuf {
    project_root().join("tests").join("fixtures").join("builds.json")
}

/// The fixture dataset, normalized.
pub fn catalog() -> Catalog {
    let bytes = std::fs::read(dataset_path()).expect("Failed to read fixture dataset");
    Catalog::from_slice(&bytes).expect("Fixture dataset is not valid JSON")
}

/// A codex context over the fixture dataset with isolated pin storage.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct TestCodex {
    _temp: TempDir,
    pub context: CodexContext,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TestCodex {
    /// Context whose catalog is already loaded.
    pub fn loaded() -> Self {
        Self::with_state(CatalogState::with_catalog(catalog()))
    }

    /// Context whose dataset never loaded.
    pub fn unloaded() -> Self {
        Self::with_state(CatalogState::new())
    }

    fn with_state(state: CatalogState) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let config = test_config(temp.path());
        Self {
            context: CodexContext::with_catalog(config, Arc::new(state)),
            _temp: temp,
        }
    }

    /// Where this context persists pins.
    pub fn storage_path(&self) -> &Path {
        &self.context.config().storage_path
    }
}

/// Defaults, with storage under `dir` and asset templates filled in.
pub fn test_config(dir: &Path) -> Config {
    Config {
        dataset_path: dataset_path(),
        storage_path: dir.join("storage.json"),
        assets: AssetTemplates {
            item: Some("https://cdn.test/{path}".to_string()),
            item_fallback: Some("https://mirror.test/{path}".to_string()),
            god: Some("https://cdn.test/{path}".to_string()),
            ..AssetTemplates::default()
        },
        ..Config::default()
    }
}

#[fixture]
pub fn codex() -> TestCodex {
    TestCodex::loaded()
}

#[fixture]
pub fn empty_codex() -> TestCodex {
    TestCodex::unloaded()
}

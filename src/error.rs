//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for pantheon-codex operations.
///
/// This is an alias for `anyhow::Result`, used at the binary edge and during
/// configuration loading. Catalog lookups never fail; they return `Option`.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading the bundled dataset fails.
///
/// Never surfaced to a user: the loader converts it into the "not loaded"
/// state and logs it.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Dataset file not found or unreadable.
    #[error("Dataset not readable at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Dataset is not valid JSON.
    #[error("Failed to parse dataset at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Background load task was cancelled or panicked.
    #[error("Dataset load task failed: {0}")]
    Task(String),
}

/// Error returned by a [`Storage`](crate::storage::Storage) backend.
///
/// Callers in the pin feature swallow it and treat it as "no stored value".
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage payload is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Error returned when an explicitly requested config file cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

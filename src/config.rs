//! Runtime configuration loaded from `config.toml`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV: &str = "CODEX_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the bundled `builds.json` dataset.
    pub dataset_path: PathBuf,
    /// Path of the key-value file backing pinned gods and the current user.
    pub storage_path: PathBuf,
    /// Result caps applied when the search text is empty.
    pub limits: Limits,
    /// Lowercase name fragments that mark an item as god-specific.
    pub god_specific_fragments: Vec<String>,
    /// URL templates for item, god and skin artwork.
    pub assets: AssetTemplates,
}

/// Truncation limits for empty-query listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    pub gods: usize,
    pub items: usize,
    pub mechanics: usize,
}

/// URL templates; `{path}` is replaced with the dataset's asset path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetTemplates {
    pub item: Option<String>,
    pub item_fallback: Option<String>,
    pub god: Option<String>,
    pub god_fallback: Option<String>,
    pub skin: Option<String>,
    pub skin_fallback: Option<String>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            gods: 80,
            items: 230,
            mechanics: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("pantheon-codex");
        Self {
            dataset_path: PathBuf::from("data/builds.json"),
            storage_path: data_dir.join("storage.json"),
            limits: Limits::default(),
            god_specific_fragments: vec!["acorn".to_string()],
            assets: AssetTemplates::default(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Uses `$CODEX_CONFIG` when set (failing loudly if it is unusable), otherwise
    /// `<config_dir>/pantheon-codex/config.toml`. A missing or broken default file
    /// falls back to defaults.
    pub fn load() -> crate::error::Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            return Ok(Self::from_path(Path::new(&explicit))?);
        }

        let Some(path) = Self::default_path() else {
            tracing::debug!("No config directory on this platform, using defaults");
            return Ok(Self::default());
        };

        match Self::from_path(&path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Read { .. }) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file at an explicit path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.dataset_path = expand_tilde(&config.dataset_path);
        config.storage_path = expand_tilde(&config.storage_path);
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// `<config_dir>/pantheon-codex/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pantheon-codex").join("config.toml"))
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn defaults_match_listing_limits() {
        let config = Config::default();
        check!(config.limits == Limits { gods: 80, items: 230, mechanics: 30 });
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[limits]\nitems = 10\n[assets]\nitem = \"https://cdn.test/{path}\"\n",
        )
        .unwrap();

        let config = Config::from_path(&path).unwrap();
        check!(config.limits.items == 10);
        check!(config.limits.gods == 80);
        check!(config.assets.item.as_deref() == Some("https://cdn.test/{path}"));
        check!(config.god_specific_fragments == vec!["acorn".to_string()]);
    }

    #[test]
    fn retired_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "debounce_ms = 150\n[limits]\ngods = 12\n").unwrap();

        let config = Config::from_path(&path).unwrap();
        check!(config.limits.gods == 12);
    }

    #[test]
    fn broken_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[limits]\ngods = \"many\"").unwrap();

        let_assert!(Err(ConfigError::Parse { .. }) = Config::from_path(&path));
    }

    #[test]
    fn tilde_paths_expand_to_home() {
        let_assert!(Some(home) = dirs::home_dir());
        check!(expand_tilde(Path::new("~/codex/builds.json")) == home.join("codex/builds.json"));
        check!(expand_tilde(Path::new("data/builds.json")) == PathBuf::from("data/builds.json"));
    }
}

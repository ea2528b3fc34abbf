//! Per-user pinned gods, persisted through a [`Storage`] backend.
//!
//! Persistence never blocks and never fails loudly: reads that fail count as
//! "nothing stored", writes run in the background and only log on failure.

use crate::dataset::God;
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const PINNED_KEY_PREFIX: &str = "pinnedGods_";
/// User assumed when none has been stored yet.
pub const DEFAULT_USER: &str = "default";

/// The stored summary of a pinned god.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedGod {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "GodName", default)]
    pub god_name: Option<String>,
    #[serde(rename = "internalName", default)]
    pub internal_name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl PinnedGod {
    pub fn from_god(god: &God) -> Self {
        Self {
            name: Some(god.display_name().to_string()),
            god_name: god.god_name.clone(),
            internal_name: god.internal_name.clone(),
            icon: god.icon.clone(),
        }
    }

    pub fn display_name(&self) -> &str {
        [&self.name, &self.god_name, &self.internal_name]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|s| !s.trim().is_empty())
            .unwrap_or_default()
    }

    fn same_god(&self, other: &Self) -> bool {
        self.display_name().eq_ignore_ascii_case(other.display_name())
    }
}

/// Storage key holding `user`'s pins.
pub fn pinned_key(user: &str) -> String {
    format!("{PINNED_KEY_PREFIX}{user}")
}

/// Result of [`PinStore::toggle_pin`].
#[derive(Debug)]
pub struct PinToggle {
    /// The list after the toggle.
    pub pinned: Vec<PinnedGod>,
    /// Whether the god is pinned now.
    pub is_pinned: bool,
    /// Background write; dropping it does not cancel the write.
    pub persist: JoinHandle<()>,
}

/// Last-write-wins view of what has been read or written this session.
#[derive(Debug, Default)]
struct PinCache {
    current_user: Option<String>,
    pinned: HashMap<String, Vec<PinnedGod>>,
}

#[derive(Debug, Clone)]
enum PersistKey {
    CurrentUser,
    Pinned(String),
}

#[derive(Debug)]
pub struct PinStore<S> {
    storage: Arc<S>,
    cache: Arc<Mutex<PinCache>>,
    /// Held while a snapshot is taken and written, so the last write wins.
    persist_lock: Arc<tokio::sync::Mutex<()>>,
}

impl<S> Clone for PinStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            cache: self.cache.clone(),
            persist_lock: self.persist_lock.clone(),
        }
    }
}

fn lock(cache: &Mutex<PinCache>) -> MutexGuard<'_, PinCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: Storage> PinStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            cache: Arc::default(),
            persist_lock: Arc::default(),
        }
    }

    /// The current user, or [`DEFAULT_USER`] when none is stored.
    pub async fn current_user(&self) -> String {
        if let Some(user) = lock(&self.cache).current_user.clone() {
            return user;
        }
        let stored = self
            .read(CURRENT_USER_KEY)
            .await
            .filter(|user| !user.trim().is_empty());
        match stored {
            Some(user) => lock(&self.cache)
                .current_user
                .get_or_insert(user)
                .clone(),
            None => DEFAULT_USER.to_string(),
        }
    }

    pub fn set_current_user(&self, user: &str) -> JoinHandle<()> {
        lock(&self.cache).current_user = Some(user.to_string());
        self.persist(PersistKey::CurrentUser)
    }

    /// `user`'s pins; empty when nothing (readable) is stored.
    pub async fn pinned(&self, user: &str) -> Vec<PinnedGod> {
        if let Some(pinned) = lock(&self.cache).pinned.get(user) {
            return pinned.clone();
        }
        let stored = self.read_pinned(user).await;
        lock(&self.cache)
            .pinned
            .entry(user.to_string())
            .or_insert(stored)
            .clone()
    }

    /// Pins `god` for `user`, or unpins it if already pinned.
    pub async fn toggle_pin(&self, user: &str, god: &God) -> PinToggle {
        // make sure the stored list is cached before editing it
        self.pinned(user).await;

        let target = PinnedGod::from_god(god);
        let (pinned, is_pinned) = {
            let mut cache = lock(&self.cache);
            let pinned = cache.pinned.entry(user.to_string()).or_default();
            let before = pinned.len();
            pinned.retain(|p| !p.same_god(&target));
            let is_pinned = pinned.len() == before;
            if is_pinned {
                pinned.push(target);
            }
            (pinned.clone(), is_pinned)
        };

        PinToggle {
            pinned,
            is_pinned,
            persist: self.persist(PersistKey::Pinned(user.to_string())),
        }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Storage read of '{}' failed: {}", key, e);
                None
            }
        }
    }

    async fn read_pinned(&self, user: &str) -> Vec<PinnedGod> {
        let Some(raw) = self.read(&pinned_key(user)).await else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable pins for '{}': {}", user, e);
            Vec::new()
        })
    }

    /// Writes the cached value for `key` in the background.
    fn persist(&self, key: PersistKey) -> JoinHandle<()> {
        let storage = self.storage.clone();
        let cache = self.cache.clone();
        let persist_lock = self.persist_lock.clone();
        tokio::spawn(async move {
            let _guard = persist_lock.lock().await;
            let (storage_key, value) = {
                let cache = lock(&cache);
                match &key {
                    PersistKey::CurrentUser => (
                        CURRENT_USER_KEY.to_string(),
                        Ok(cache.current_user.clone().unwrap_or_default()),
                    ),
                    PersistKey::Pinned(user) => (
                        pinned_key(user),
                        serde_json::to_string(cache.pinned.get(user).map_or(&[][..], Vec::as_slice)),
                    ),
                }
            };
            let result = match value {
                Ok(value) => storage.set(&storage_key, value).await,
                Err(e) => Err(e.into()),
            };
            if let Err(e) = result {
                tracing::warn!("Storage write of '{}' failed: {}", storage_key, e);
            }
        })
    }
}

//! The normalized, immutable view of one dataset load.

use super::flatten::flatten_any;
use super::model::{God, Item, Mechanic, as_number};
use crate::matching::ItemIndex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// Flattened gods and items plus the item index, built once per load.
#[derive(Debug, Default)]
pub struct Catalog {
    gods: Vec<God>,
    /// Listed items, sorted case-insensitively by display name.
    items: Vec<Arc<Item>>,
    mechanics: Vec<Mechanic>,
    mechanic_categories: BTreeMap<String, u64>,
    index: ItemIndex,
    /// xxh3 of the source bytes; identical bytes produce an identical catalog.
    fingerprint: u64,
}

impl Catalog {
    /// The "not loaded" catalog: every list is empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses raw dataset bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let root: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(root, xxh3_64(bytes)))
    }

    /// Normalizes an already-parsed dataset document.
    pub fn from_value(mut root: Value, fingerprint: u64) -> Self {
        let start = std::time::Instant::now();

        let raw_gods = flatten_any(&root["gods"]);
        let gods: Vec<God> = raw_gods.iter().filter_map(|v| God::from_value(v)).collect();
        if gods.len() < raw_gods.len() {
            tracing::warn!(
                "Skipped {} god records without a usable name",
                raw_gods.len() - gods.len()
            );
        }

        let raw_items = flatten_any(&root["items"]);
        let all_items: Vec<Arc<Item>> = raw_items
            .iter()
            .filter_map(|v| Item::from_value(v))
            .map(Arc::new)
            .collect();
        if all_items.len() < raw_items.len() {
            tracing::debug!(
                "{} item entries are groupings or malformed and were not flattened into items",
                raw_items.len() - all_items.len()
            );
        }

        let mut items: Vec<Arc<Item>> = all_items
            .iter()
            .filter(|item| item.is_listed())
            .cloned()
            .collect();
        items.sort_by_cached_key(|item| item.display_name().to_lowercase());

        let mechanics_root = &root["gameplayMechanics"];
        let mechanics: Vec<Mechanic> = flatten_any(&mechanics_root["mechanics"])
            .into_iter()
            .filter(|v| v.is_object())
            .filter_map(|v| serde_json::from_value::<Mechanic>(v.clone()).ok())
            .filter(|m| !m.name.trim().is_empty())
            .collect();
        let mechanic_categories: BTreeMap<String, u64> = mechanics_root["categories"]
            .as_object()
            .map(|categories| {
                categories
                    .iter()
                    .filter_map(|(name, count)| {
                        as_number(count).map(|n| (name.clone(), n.max(0.0) as u64))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let items_source = Arc::new(
            root.get_mut("items")
                .map(Value::take)
                .unwrap_or(Value::Null),
        );
        let index = ItemIndex::build(all_items).with_source(items_source);

        let catalog = Self {
            gods,
            items,
            mechanics,
            mechanic_categories,
            index,
            fingerprint,
        };

        tracing::info!(
            "Normalized dataset: {} gods, {} listed items, {} indexed items, {} mechanics in {:?}",
            catalog.gods.len(),
            catalog.items.len(),
            catalog.index.len(),
            catalog.mechanics.len(),
            start.elapsed()
        );

        catalog
    }

    pub fn gods(&self) -> &[God] {
        &self.gods
    }

    /// Listed items in display order.
    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn mechanics(&self) -> &[Mechanic] {
        &self.mechanics
    }

    /// Declared mechanic categories and their advertised counts.
    pub fn mechanic_categories(&self) -> &BTreeMap<String, u64> {
        &self.mechanic_categories
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Looks a god up by display name, case-insensitively.
    pub fn god(&self, name: &str) -> Option<&God> {
        let name = name.trim();
        self.gods
            .iter()
            .find(|god| god.display_name().eq_ignore_ascii_case(name))
    }

    pub fn is_empty(&self) -> bool {
        self.gods.is_empty() && self.items.is_empty()
    }
}

//! Typed views over the loosely-shaped dataset records.
//!
//! Every field is optional and deserialized leniently: a field with an
//! unexpected JSON type degrades to its default instead of rejecting the
//! whole record. Only a missing identity makes a record unusable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A playable god.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct God {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
    #[serde(rename = "GodName", deserialize_with = "lenient::or_default")]
    pub god_name: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: Option<String>,
    #[serde(rename = "displayName", deserialize_with = "lenient::or_default")]
    pub display_name: Option<String>,
    #[serde(rename = "internalName", deserialize_with = "lenient::or_default")]
    pub internal_name: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub pantheon: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub roles: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub role: Option<Vec<String>>,
    /// stat name -> level ("1", "20", ...) -> value
    #[serde(rename = "baseStats", deserialize_with = "lenient::or_default")]
    pub base_stats: BTreeMap<String, BTreeMap<String, Value>>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub scaling: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub abilities: BTreeMap<String, Ability>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub skins: BTreeMap<String, Skin>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub tips: Vec<Tip>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub builds: Vec<Build>,
    pub passive: Option<Value>,
    pub aspect: Option<Value>,
    #[serde(rename = "loreShort")]
    pub lore_short: Option<Value>,
}

impl God {
    /// Interprets a flattened dataset value as a god.
    ///
    /// Returns `None` for non-objects and for objects without any identity field.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let god: Self = serde_json::from_value(value.clone()).ok()?;
        god.name().is_some().then_some(god)
    }

    /// `name | GodName | title | displayName`, first non-empty wins.
    pub fn name(&self) -> Option<&str> {
        [&self.name, &self.god_name, &self.title, &self.display_name]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|s| !s.trim().is_empty())
    }

    /// Display name, empty when the record is malformed.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or_default()
    }

    /// Declared roles: `roles`, else `role`, else nothing.
    pub fn declared_roles(&self) -> &[String] {
        self.roles
            .as_deref()
            .or(self.role.as_deref())
            .unwrap_or_default()
    }

    /// Ability by slot number (1 => `A01`).
    pub fn ability(&self, slot: u8) -> Option<&Ability> {
        self.abilities.get(&ability_key(slot))
    }
}

/// `A0n` key for ability slot `n`.
pub fn ability_key(slot: u8) -> String {
    format!("A{:02}", slot)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ability {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub scales: Option<Value>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: Option<String>,
    #[serde(rename = "shortDesc", deserialize_with = "lenient::or_default")]
    pub short_desc: Option<String>,
    #[serde(rename = "valueKeys", deserialize_with = "lenient::or_default")]
    pub value_keys: BTreeMap<String, Vec<String>>,
}

impl Ability {
    pub fn summary(&self) -> Option<&str> {
        self.description.as_deref().or(self.short_desc.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skin {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub skin: Option<String>,
}

/// Free-text guidance attached to a god.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tip {
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub value: String,
}

/// A curated item loadout owned by a god.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    #[serde(deserialize_with = "lenient::joined_text")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "lenient::joined_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::joined_text")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient::joined_text")]
    pub lane: Option<String>,
    #[serde(deserialize_with = "lenient::joined_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub starting: Option<Vec<Value>>,
    #[serde(rename = "buildsFromT1", deserialize_with = "lenient::or_default")]
    pub builds_from_t1: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub full_build: Option<Vec<Value>>,
    #[serde(rename = "fullBuild", deserialize_with = "lenient::or_default")]
    pub full_build_camel: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub components: Option<Vec<Value>>,
    #[serde(rename = "final", deserialize_with = "lenient::or_default")]
    pub final_items: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub items: Option<Vec<Value>>,
}

impl Build {
    /// Text fields used for role classification, in `role, lane, notes, title, name` order.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        [&self.role, &self.lane, &self.notes, &self.title, &self.name]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }

    /// Final item slots normalized to names.
    ///
    /// Reads the first present of `full_build | fullBuild | components | final | items`.
    pub fn final_item_names(&self) -> Vec<String> {
        let slots = [
            &self.full_build,
            &self.full_build_camel,
            &self.components,
            &self.final_items,
            &self.items,
        ]
        .into_iter()
        .find_map(|field| field.as_deref())
        .unwrap_or_default();
        slot_names(slots)
    }

    /// Starting item slots normalized to names (`starting`, else `buildsFromT1`).
    pub fn starting_item_names(&self) -> Vec<String> {
        let slots = self
            .starting
            .as_deref()
            .or(self.builds_from_t1.as_deref())
            .unwrap_or_default();
        slot_names(slots)
    }
}

/// Normalizes item slots that may be plain strings or objects.
///
/// Objects contribute `name || internalName || item || itemName`; empty slots are dropped.
pub fn slot_names(slots: &[Value]) -> Vec<String> {
    slots
        .iter()
        .filter_map(|slot| match slot {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(map) => ["name", "internalName", "item", "itemName"]
                .into_iter()
                .filter_map(|key| map.get(key).and_then(Value::as_str))
                .find(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// A purchasable item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
    #[serde(rename = "internalName", deserialize_with = "lenient::or_default")]
    pub internal_name: Option<String>,
    #[serde(deserialize_with = "lenient::tier")]
    pub tier: Option<u8>,
    #[serde(deserialize_with = "lenient::name_list")]
    pub components: Vec<String>,
    #[serde(rename = "buildsFromT1", deserialize_with = "lenient::name_list")]
    pub builds_from_t1: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub stats: BTreeMap<String, Value>,
    #[serde(deserialize_with = "lenient::flag")]
    pub active: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub consumable: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub relic: bool,
    #[serde(rename = "godSpecific", deserialize_with = "lenient::flag")]
    pub god_specific: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub starter: bool,
    #[serde(rename = "totalCost", deserialize_with = "lenient::number")]
    pub total_cost: Option<f64>,
    #[serde(rename = "stepCost", deserialize_with = "lenient::number")]
    pub step_cost: Option<f64>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: Option<String>,
}

impl Item {
    /// Interprets a flattened dataset value as an item.
    ///
    /// An object counts when it has a `name` or `internalName`, or when it is
    /// flagged `active: true` or `consumable: true` even without either.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let named = ["name", "internalName"]
            .into_iter()
            .any(|key| map.get(key).and_then(Value::as_str).is_some_and(|s| !s.trim().is_empty()));
        let flagged = ["active", "consumable"]
            .into_iter()
            .any(|key| map.get(key) == Some(&Value::Bool(true)));
        if !named && !flagged {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Whether the item can be registered in a name index.
    pub fn has_identity(&self) -> bool {
        self.name_field().is_some() || self.internal_name_field().is_some()
    }

    pub fn name_field(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn internal_name_field(&self) -> Option<&str> {
        self.internal_name.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// `name`, else `internalName`, else empty.
    pub fn display_name(&self) -> &str {
        self.name_field()
            .or(self.internal_name_field())
            .unwrap_or_default()
    }

    /// A "real" item for catalog listings.
    pub fn is_listed(&self) -> bool {
        self.has_identity() || self.active || self.consumable
    }
}

/// An entry in the gameplay mechanics glossary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mechanic {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Any value that does not fit `T` becomes `T::default()`.
    pub(super) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// `"x"` becomes `["x"]`; arrays keep their string entries.
    pub(super) fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(vec![s]),
            Value::Array(values) => Some(
                values
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => None,
        })
    }

    /// Strings pass through; string arrays are joined with spaces.
    pub(super) fn joined_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Array(values) => {
                let parts: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }
            _ => None,
        })
    }

    /// Name references given as strings or as `{name}` / `{internalName}` objects.
    pub(super) fn name_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(values) => super::slot_names(&values),
            Value::String(s) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        })
    }

    /// Only a literal `true` counts.
    pub(super) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)? == Value::Bool(true))
    }

    /// Numbers or numeric strings.
    pub(super) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(as_number(&Value::deserialize(deserializer)?))
    }

    /// Tiers 1..=3 given as JSON numbers; strings such as "2" or "T2" are no tier.
    pub(super) fn tier<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && (1.0..=3.0).contains(n))
            .map(|n| n as u8))
    }

    pub(crate) fn as_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

pub(crate) use lenient::as_number;

//! Name index over the item list with tiered fuzzy resolution.
//!
//! Free-text references in the dataset (recipe components, build slots) rarely
//! match an item name exactly. Resolution walks a fixed ladder of increasingly
//! loose comparisons and stops at the first tier that produces a hit:
//!
//! 1. exact (lowercase + trim) against `name` or `internalName`
//! 2. alphanumeric-only key
//! 3. whitespace-stripped key
//! 4. substring containment in either direction
//! 5. every query word contained in the name (or the space-stripped `internalName`)
//! 6. depth-first walk of the raw nested item tree, applying 1-5 per node
//!
//! Tiers 1-3 are hash lookups. When several items share a key the first
//! registered one wins.

use super::normalize::{alnum_key, lower_trim, no_space_key};
use crate::dataset::Item;
use ahash::AHashMap;
use serde_json::Value;
use std::sync::Arc;

/// Which rung of the ladder produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Exact,
    Normalized,
    NoSpaces,
    Substring,
    TokenSubset,
    Nested,
}

impl MatchTier {
    /// Per-candidate tiers, in priority order.
    const CANDIDATE_TIERS: [Self; 5] = [
        Self::Exact,
        Self::Normalized,
        Self::NoSpaces,
        Self::Substring,
        Self::TokenSubset,
    ];
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact name",
            Self::Normalized => "name without punctuation",
            Self::NoSpaces => "name without spaces",
            Self::Substring => "partial name",
            Self::TokenSubset => "all query words",
            Self::Nested => "nested item group",
        })
    }
}

/// A resolved reference and the tier that matched it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub item: Arc<Item>,
    pub tier: MatchTier,
}

/// The query forms each tier compares against.
#[derive(Debug)]
struct QueryKeys<'q> {
    lower: String,
    alnum: String,
    no_space: String,
    words: Vec<&'q str>,
}

impl<'q> QueryKeys<'q> {
    fn new(lower: &'q str) -> Self {
        Self {
            lower: lower.to_string(),
            alnum: alnum_key(lower),
            no_space: no_space_key(lower),
            words: lower.split_whitespace().collect(),
        }
    }
}

/// Precomputed lowercase identity of one item.
#[derive(Debug, Clone)]
struct Candidate {
    name: Option<String>,
    internal: Option<String>,
}

impl Candidate {
    fn new(name: Option<&str>, internal: Option<&str>) -> Self {
        Self {
            name: name.map(lower_trim).filter(|s| !s.is_empty()),
            internal: internal.map(lower_trim).filter(|s| !s.is_empty()),
        }
    }

    fn fields(&self) -> impl Iterator<Item = &str> {
        self.name.iter().chain(self.internal.iter()).map(String::as_str)
    }

    fn matches(&self, tier: MatchTier, query: &QueryKeys<'_>) -> bool {
        match tier {
            MatchTier::Exact => self.fields().any(|field| field == query.lower),
            MatchTier::Normalized => {
                !query.alnum.is_empty() && self.fields().any(|field| alnum_key(field) == query.alnum)
            }
            MatchTier::NoSpaces => self.fields().any(|field| no_space_key(field) == query.no_space),
            MatchTier::Substring => self
                .fields()
                .any(|field| query.lower.contains(field) || field.contains(query.lower.as_str())),
            MatchTier::TokenSubset => {
                if query.words.is_empty() {
                    return false;
                }
                let in_name = self
                    .name
                    .as_deref()
                    .is_some_and(|name| query.words.iter().all(|word| name.contains(word)));
                let in_internal = self.internal.as_deref().is_some_and(|internal| {
                    let internal = no_space_key(internal);
                    query.words.iter().all(|word| internal.contains(word))
                });
                in_name || in_internal
            }
            MatchTier::Nested => false,
        }
    }
}

/// Lookup index over the flattened item list.
///
/// Built once per dataset load and immutable afterwards.
#[derive(Debug, Default)]
pub struct ItemIndex {
    items: Vec<Arc<Item>>,
    candidates: Vec<Candidate>,
    exact: AHashMap<String, usize>,
    normalized: AHashMap<String, usize>,
    no_spaces: AHashMap<String, usize>,
    /// Raw nested `items` tree for the depth-first fallback.
    source: Option<Arc<Value>>,
}

impl ItemIndex {
    /// Registers every item with a usable identity. O(items).
    pub fn build(items: impl IntoIterator<Item = Arc<Item>>) -> Self {
        let mut index = Self::default();

        for item in items {
            if !item.has_identity() {
                continue;
            }
            let slot = index.items.len();
            let candidate = Candidate::new(item.name_field(), item.internal_name_field());

            for field in candidate.fields() {
                index.exact.entry(field.to_string()).or_insert(slot);
                let alnum = alnum_key(field);
                if !alnum.is_empty() {
                    index.normalized.entry(alnum).or_insert(slot);
                }
                index.no_spaces.entry(no_space_key(field)).or_insert(slot);
            }

            index.candidates.push(candidate);
            index.items.push(item);
        }

        tracing::debug!(
            "Built item index: {} items, {} exact keys, {} normalized keys",
            index.items.len(),
            index.exact.len(),
            index.normalized.len()
        );

        index
    }

    /// Attaches the raw nested item tree used by the depth-first fallback.
    pub fn with_source(mut self, source: Arc<Value>) -> Self {
        self.source = Some(source);
        self
    }

    /// Resolves a free-text reference to an item, or `None` when nothing matches.
    pub fn resolve(&self, query: &str) -> Option<Arc<Item>> {
        self.resolve_with_tier(query).map(|resolution| resolution.item)
    }

    /// Like [`resolve`](Self::resolve) but reports which tier matched.
    pub fn resolve_with_tier(&self, query: &str) -> Option<Resolution> {
        let lower = lower_trim(query);
        if lower.is_empty() {
            return None;
        }
        let keys = QueryKeys::new(&lower);

        let hit = self
            .lookup(&keys)
            .or_else(|| self.scan(&keys))
            .or_else(|| self.nested(&keys));

        if hit.is_none() {
            tracing::debug!("No item matches reference '{}'", query);
        }
        hit
    }

    /// Tiers 1-3: hash lookups.
    fn lookup(&self, keys: &QueryKeys<'_>) -> Option<Resolution> {
        let found = self
            .exact
            .get(&keys.lower)
            .map(|&slot| (slot, MatchTier::Exact))
            .or_else(|| {
                self.normalized
                    .get(&keys.alnum)
                    .map(|&slot| (slot, MatchTier::Normalized))
            })
            .or_else(|| {
                self.no_spaces
                    .get(&keys.no_space)
                    .map(|&slot| (slot, MatchTier::NoSpaces))
            });

        found.map(|(slot, tier)| Resolution {
            item: self.items[slot].clone(),
            tier,
        })
    }

    /// Tiers 4-5: linear scans in registration order.
    fn scan(&self, keys: &QueryKeys<'_>) -> Option<Resolution> {
        [MatchTier::Substring, MatchTier::TokenSubset]
            .into_iter()
            .find_map(|tier| {
                self.candidates
                    .iter()
                    .position(|candidate| candidate.matches(tier, keys))
                    .map(|slot| Resolution {
                        item: self.items[slot].clone(),
                        tier,
                    })
            })
    }

    /// Tier 6: walk the raw tree, descending through objects that have no identity.
    fn nested(&self, keys: &QueryKeys<'_>) -> Option<Resolution> {
        let source = self.source.as_deref()?;
        find_nested(source, keys).map(|item| Resolution {
            item: Arc::new(item),
            tier: MatchTier::Nested,
        })
    }

    /// All indexed items in registration order.
    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn find_nested(value: &Value, keys: &QueryKeys<'_>) -> Option<Item> {
    match value {
        Value::Array(children) => children.iter().find_map(|child| find_nested(child, keys)),
        Value::Object(map) => {
            let name = map.get("name").and_then(Value::as_str);
            let internal = map.get("internalName").and_then(Value::as_str);
            let candidate = Candidate::new(name, internal);

            if candidate.fields().next().is_none() {
                return map
                    .values()
                    .filter(|child| child.is_array())
                    .find_map(|child| find_nested(child, keys));
            }

            MatchTier::CANDIDATE_TIERS
                .into_iter()
                .any(|tier| candidate.matches(tier, keys))
                .then(|| Item::from_value(value))
                .flatten()
        }
        _ => None,
    }
}

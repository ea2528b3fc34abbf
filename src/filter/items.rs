//! Item listing: stat, then tier, then three-pass name search.

use super::{cap, search_text};
use crate::dataset::Item;
use crate::matching::normalize::{alnum_key, no_space_key};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Closed set of tier tags offered by the item filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFilter {
    Tier(u8),
    Starter,
    Active,
    Relic,
    Consumable,
    GodSpecific,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier filter '{0}'")]
pub struct UnknownTier(pub String);

impl FromStr for TierFilter {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = no_space_key(s);
        Ok(match key.as_str() {
            "tier1" | "t1" | "1" => Self::Tier(1),
            "tier2" | "t2" | "2" => Self::Tier(2),
            "tier3" | "t3" | "3" => Self::Tier(3),
            "starter" => Self::Starter,
            "active" => Self::Active,
            "relic" => Self::Relic,
            "consumable" => Self::Consumable,
            "godspecific" | "god-specific" => Self::GodSpecific,
            _ => return Err(UnknownTier(s.to_string())),
        })
    }
}

impl fmt::Display for TierFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier(n) => write!(f, "Tier {n}"),
            Self::Starter => f.write_str("Starter"),
            Self::Active => f.write_str("Active"),
            Self::Relic => f.write_str("Relic"),
            Self::Consumable => f.write_str("Consumable"),
            Self::GodSpecific => f.write_str("God Specific"),
        }
    }
}

fn positive(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > 0.0)
}

impl TierFilter {
    /// Whether `item` carries this tag.
    ///
    /// `god_specific_fragments` are lowercase name fragments of items that
    /// belong to a single god.
    pub fn matches(self, item: &Item, god_specific_fragments: &[String]) -> bool {
        let name = item.display_name().to_lowercase();
        match self {
            Self::Tier(n) => item.tier == Some(n),
            Self::Starter => item.starter || name.contains("starter"),
            Self::Active => {
                let priced = item.tier.is_some() || positive(item.total_cost) || !item.stats.is_empty();
                let consumable_like = positive(item.step_cost) && item.tier.is_none();
                item.active && priced && !consumable_like
            }
            Self::Relic => item.relic,
            Self::Consumable => {
                item.consumable
                    || (item.active && positive(item.step_cost) && item.tier.is_none())
                    || name.contains("consumable")
            }
            Self::GodSpecific => {
                item.god_specific
                    || god_specific_fragments
                        .iter()
                        .any(|fragment| !fragment.is_empty() && name.contains(&fragment.to_lowercase()))
            }
        }
    }
}

/// Parameters owned by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub search: String,
    /// Exact stat key, e.g. "Physical Power".
    pub stat: Option<String>,
    pub tier: Option<TierFilter>,
}

impl ItemQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Self::default()
        }
    }
}

/// Name or internal name contains the query, tried raw, then alphanumeric-only,
/// then with whitespace removed.
fn matches_search(item: &Item, text: &str) -> bool {
    let fields: Vec<&str> = item
        .name_field()
        .into_iter()
        .chain(item.internal_name_field())
        .collect();

    if fields.iter().any(|f| f.to_lowercase().contains(text)) {
        return true;
    }

    let alnum = alnum_key(text);
    if !alnum.is_empty() && fields.iter().any(|f| alnum_key(f).contains(&alnum)) {
        return true;
    }

    let compact = no_space_key(text);
    !compact.is_empty() && fields.iter().any(|f| no_space_key(f).contains(&compact))
}

/// Visible items for `query`, preserving catalog order.
///
/// With no search text the result is capped at `limit`.
pub fn filter_items<'a>(
    items: &'a [Arc<Item>],
    query: &ItemQuery,
    limit: usize,
    god_specific_fragments: &[String],
) -> Vec<&'a Arc<Item>> {
    let search = search_text(&query.search);

    let results: Vec<&Arc<Item>> = items
        .iter()
        .filter(|item| match &query.stat {
            Some(stat) => item.stats.contains_key(stat),
            None => true,
        })
        .filter(|item| {
            query
                .tier
                .is_none_or(|tier| tier.matches(item, god_specific_fragments))
        })
        .filter(|item| search.as_deref().is_none_or(|text| matches_search(item, text)))
        .collect();

    tracing::debug!(
        "Item filter {:?} matched {} of {}",
        query,
        results.len(),
        items.len()
    );

    cap(results, search.is_some(), limit)
}

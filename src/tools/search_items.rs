//! Item listing handler.

use super::not_loaded_note;
use crate::context::CodexContext;
use crate::filter::{ItemQuery, TierFilter, filter_items};
use crate::format;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchItemsRequest {
    /// Substring of the item's name or internal name; punctuation and spaces are ignored as a fallback
    #[serde(default)]
    pub query: Option<String>,
    /// Only items granting this stat, e.g. "Physical Power"
    #[serde(default)]
    pub stat: Option<String>,
    /// One of: Tier 1, Tier 2, Tier 3, Starter, Active, Relic, Consumable, God Specific
    #[serde(default)]
    pub tier: Option<String>,
}

pub async fn handle_search_items(
    context: &CodexContext,
    request: SearchItemsRequest,
) -> Result<String, String> {
    let tier = request
        .tier
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::parse::<TierFilter>)
        .transpose()
        .map_err(|e| {
            format!(
                "{}. Expected one of: Tier 1, Tier 2, Tier 3, Starter, Active, Relic, Consumable, God Specific",
                e
            )
        })?;

    let query = ItemQuery {
        search: request.query.unwrap_or_default(),
        stat: request.stat.filter(|s| !s.is_empty()),
        tier,
    };

    let catalog = context.catalog().await;
    let config = context.config();
    let items = filter_items(
        catalog.items(),
        &query,
        config.limits.items,
        &config.god_specific_fragments,
    );

    if items.is_empty() {
        let mut msg = "No items match.".to_string();
        if let Some(note) = not_loaded_note(&context.catalog_state().status().await) {
            msg.push(' ');
            msg.push_str(note);
        }
        return Ok(msg);
    }

    let mut out = format!("Items ({} of {}):\n", items.len(), catalog.items().len());
    for item in items {
        let name = match item.display_name() {
            "" => "(unnamed)",
            name => name,
        };
        let _ = write!(out, "• {}", name);
        let tags = format::item_tags(item);
        if !tags.is_empty() {
            let _ = write!(out, " [{}]", tags);
        }
        if !item.stats.is_empty() {
            let stats: Vec<&str> = item.stats.keys().map(String::as_str).collect();
            let _ = write!(out, " · {}", stats.join(", "));
        }
        out.push('\n');
    }
    Ok(out)
}

//! Gameplay mechanics glossary handler.

use crate::context::CodexContext;
use crate::filter::{MechanicQuery, filter_mechanics};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchMechanicsRequest {
    /// Substring of the mechanic's name or description
    #[serde(default)]
    pub query: Option<String>,
    /// Exact category name
    #[serde(default)]
    pub category: Option<String>,
}

pub async fn handle_search_mechanics(
    context: &CodexContext,
    request: SearchMechanicsRequest,
) -> Result<String, String> {
    let query = MechanicQuery {
        search: request.query.unwrap_or_default(),
        category: request.category.filter(|c| !c.is_empty()),
    };

    let catalog = context.catalog().await;
    let mechanics = filter_mechanics(catalog.mechanics(), &query, context.config().limits.mechanics);

    if mechanics.is_empty() {
        let mut msg = "No mechanics match.".to_string();
        if catalog.mechanics().is_empty() && !catalog.mechanic_categories().is_empty() {
            let categories: Vec<String> = catalog
                .mechanic_categories()
                .iter()
                .map(|(name, count)| format!("{} ({})", name, count))
                .collect();
            let _ = write!(
                msg,
                " The dataset declares categories but no entries: {}",
                categories.join(", ")
            );
        }
        return Ok(msg);
    }

    let mut out = format!("Mechanics ({}):\n", mechanics.len());
    for mechanic in mechanics {
        let _ = write!(out, "• {}", mechanic.name);
        if let Some(category) = &mechanic.category {
            let _ = write!(out, " [{}]", category);
        }
        if !mechanic.description.is_empty() {
            let _ = write!(out, ": {}", mechanic.description);
        }
        out.push('\n');
    }
    Ok(out)
}

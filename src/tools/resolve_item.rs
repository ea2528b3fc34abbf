//! Item lookup handler: fuzzy resolution, recipe tree and artwork.

use crate::assets::AssetKind;
use crate::context::CodexContext;
use crate::format;
use crate::matching::{RecipeNode, recipe_tree, suggest_items};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveItemRequest {
    /// Item name as written anywhere: display name, internal name, or a loose variant
    pub name: String,
}

pub async fn handle_resolve_item(
    context: &CodexContext,
    request: ResolveItemRequest,
) -> Result<String, String> {
    let catalog = context.catalog().await;
    let index = catalog.index();

    let Some(resolution) = index.resolve_with_tier(&request.name) else {
        let mut msg = format!("No item matches '{}'.", request.name.trim());
        let suggestions = suggest_items(index, &request.name, 5);
        if !suggestions.is_empty() {
            msg.push_str(" Did you mean:\n");
            for suggestion in suggestions {
                let _ = writeln!(msg, "• {}", suggestion.name);
            }
        }
        return Ok(msg);
    };

    let item = &resolution.item;
    let mut out = item.display_name().to_string();
    if let Some(internal) = item.internal_name_field().filter(|i| *i != item.display_name()) {
        let _ = write!(out, " ({})", internal);
    }
    let tags = format::item_tags(item);
    if !tags.is_empty() {
        let _ = write!(out, " [{}]", tags);
    }
    out.push('\n');
    let _ = writeln!(out, "Matched by: {}", resolution.tier);

    if !item.stats.is_empty() {
        let stats: Vec<String> = item
            .stats
            .iter()
            .map(|(name, value)| match value.as_f64() {
                Some(n) => format!("{} {}", name, format::number(n)),
                None => format!("{} {}", name, value),
            })
            .collect();
        let _ = writeln!(out, "Stats: {}", stats.join(", "));
    }
    if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{}", description);
    }
    let icon = item
        .icon
        .as_deref()
        .and_then(|path| context.assets().resolve(AssetKind::Item, path));
    format::asset(&mut out, "Icon", icon.as_ref());

    let recipe = recipe_tree(index, item.clone());
    if !recipe.root.children.is_empty() {
        out.push_str("Recipe:\n");
        for child in &recipe.root.children {
            render_node(&mut out, child, 1);
        }
    }
    if recipe.warning_count() > 0 {
        let _ = writeln!(
            out,
            "Unresolved components ({}): {}",
            recipe.warning_count(),
            recipe.missing.join(", ")
        );
    }

    Ok(out)
}

fn render_node(out: &mut String, node: &RecipeNode, depth: usize) {
    let _ = write!(out, "{}• {}", "  ".repeat(depth), node.item.display_name());
    if let Some(tier) = node.item.tier {
        let _ = write!(out, " (T{})", tier);
    }
    out.push('\n');
    for child in &node.children {
        render_node(out, child, depth + 1);
    }
}

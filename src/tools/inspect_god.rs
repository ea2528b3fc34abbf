//! God detail handler: roles, abilities, leveling, stats, builds and artwork.

use crate::assets::AssetKind;
use crate::context::CodexContext;
use crate::dataset::{Catalog, God, Item};
use crate::format;
use crate::leveling::extract_orders;
use crate::matching::{resolve_build, suggest_names};
use crate::roles::{CanonicalRole, classify_build_roles};
use crate::stats::{MAX_LEVEL, god_stats_at_level};
use rmcp::schemars;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InspectGodRequest {
    /// God name (case-insensitive)
    pub name: String,
    /// Lane to focus leveling orders and builds on, e.g. "Solo" or "Jungle"
    #[serde(default)]
    pub role: Option<String>,
    /// Level (1-20) for base stats (default: 1)
    #[serde(default)]
    pub level: Option<u8>,
}

pub async fn handle_inspect_god(
    context: &CodexContext,
    request: InspectGodRequest,
) -> Result<String, String> {
    let catalog = context.catalog().await;
    let Some(god) = catalog.god(&request.name) else {
        return Ok(not_found(&catalog, &request.name));
    };

    let role_hint = request.role.as_deref().map(str::trim).filter(|r| !r.is_empty());
    let lane_hint = role_hint.and_then(|r| r.parse::<CanonicalRole>().ok());
    let level = request.level.unwrap_or(1);

    let mut out = String::new();
    header(&mut out, context, god);
    abilities(&mut out, god);

    let orders = extract_orders(god, role_hint);
    let _ = writeln!(
        out,
        "Leveling{}: start {}, max {}",
        role_hint.map(|r| format!(" ({r})")).unwrap_or_default(),
        format::slot_order(orders.start_order.as_deref()),
        format::slot_order(orders.max_order.as_deref()),
    );

    let stats = god_stats_at_level(god, level);
    if !stats.is_empty() {
        let line: Vec<String> = stats
            .iter()
            .map(|(name, value)| format!("{} {}", name, format::number(*value)))
            .collect();
        let _ = writeln!(
            out,
            "Stats at level {}: {}",
            level.clamp(1, MAX_LEVEL),
            line.join(", ")
        );
    }

    builds(&mut out, &catalog, god, lane_hint);
    Ok(out)
}

fn not_found(catalog: &Catalog, name: &str) -> String {
    let mut msg = format!("No god named '{}'.", name.trim());
    let suggestions = suggest_names(catalog.gods().iter().map(God::display_name), name, 5);
    if !suggestions.is_empty() {
        msg.push_str(" Did you mean:\n");
        for suggestion in suggestions {
            let _ = writeln!(msg, "• {}", suggestion.name);
        }
    }
    msg
}

fn header(out: &mut String, context: &CodexContext, god: &God) {
    out.push_str(god.display_name());
    if let Some(title) = god.title.as_deref().filter(|t| *t != god.display_name()) {
        let _ = write!(out, ", {}", title);
    }
    if let Some(pantheon) = god.pantheon.as_deref() {
        let _ = write!(out, " ({})", pantheon);
    }
    out.push('\n');

    let roles = format::god_roles(god);
    if !roles.is_empty() {
        let _ = writeln!(out, "Roles: {}", roles);
    }
    let build_lanes: BTreeSet<CanonicalRole> = god.builds.iter().flat_map(classify_build_roles).collect();
    if !build_lanes.is_empty() {
        let lanes: Vec<&str> = build_lanes.iter().map(|lane| lane.as_str()).collect();
        let _ = writeln!(out, "Build lanes: {}", lanes.join(", "));
    }

    let icon = god
        .icon
        .as_deref()
        .and_then(|path| context.assets().resolve(AssetKind::God, path));
    format::asset(out, "Icon", icon.as_ref());

    for (name, skin) in &god.skins {
        let art = skin
            .skin
            .as_deref()
            .and_then(|path| context.assets().resolve(AssetKind::Skin, path));
        let label = format!("Skin {}", skin.name.as_deref().unwrap_or(name));
        format::asset(out, &label, art.as_ref());
    }
}

fn abilities(out: &mut String, god: &God) {
    if god.abilities.is_empty() {
        return;
    }
    out.push_str("Abilities:\n");
    for (key, ability) in &god.abilities {
        let _ = write!(out, "  {} {}", key, ability.name.as_deref().unwrap_or("(unnamed)"));
        if let Some(summary) = ability.summary().filter(|s| !s.is_empty()) {
            let _ = write!(out, ": {}", summary);
        }
        out.push('\n');
    }
}

fn builds(out: &mut String, catalog: &Catalog, god: &God, lane_hint: Option<CanonicalRole>) {
    let mut resolved: Vec<_> = god
        .builds
        .iter()
        .map(|build| resolve_build(catalog.index(), build, lane_hint))
        .collect();
    // a lane without its own build falls back to every build
    if resolved.iter().any(|build| lane_hint.is_some_and(|lane| build.role == Some(lane))) {
        resolved.retain(|build| build.role == lane_hint);
    }
    if resolved.is_empty() {
        return;
    }

    out.push_str("Builds:\n");
    for build in resolved {
        let title = build
            .build
            .title
            .as_deref()
            .or(build.build.name.as_deref())
            .unwrap_or("Build");
        let lane = build.role.map_or("General", CanonicalRole::as_str);
        let _ = writeln!(out, "  [{}] {}", lane, title);

        let names = |items: &[Arc<Item>]| {
            items
                .iter()
                .map(|item| item.display_name().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        if !build.starting.resolved.is_empty() {
            let _ = writeln!(out, "    Start: {}", names(&build.starting.resolved));
        }
        if !build.final_items.resolved.is_empty() {
            let _ = writeln!(out, "    Final: {}", names(&build.final_items.resolved));
        }
        if build.warning_count() > 0 {
            let missing: Vec<&str> = build
                .starting
                .missing
                .iter()
                .chain(&build.final_items.missing)
                .map(String::as_str)
                .collect();
            let _ = writeln!(out, "    Unresolved: {}", missing.join(", "));
        }
    }
}

//! Resolution of free-text item references: recipe components and build slots.
//!
//! References that do not resolve are collected as warnings and dropped.
//! A recipe with a typo in one component still renders the rest.

use super::index::ItemIndex;
use crate::dataset::{Build, Item};
use crate::roles::{CanonicalRole, classify_build_role};
use std::collections::HashSet;
use std::sync::Arc;

/// Recipe trees never go deeper than tier 3 -> tier 2 -> tier 1.
const MAX_RECIPE_DEPTH: usize = 3;

/// Outcome of resolving a list of name references.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRefs {
    /// Matched items, in reference order.
    pub resolved: Vec<Arc<Item>>,
    /// References that matched nothing.
    pub missing: Vec<String>,
}

impl ResolvedRefs {
    pub fn warning_count(&self) -> usize {
        self.missing.len()
    }
}

/// Resolves each reference, logging the ones that match nothing.
///
/// `context` names the owner of the list in log output (e.g. an item name).
pub fn resolve_refs(index: &ItemIndex, names: &[String], context: &str) -> ResolvedRefs {
    let mut refs = ResolvedRefs::default();
    for name in names {
        match index.resolve(name) {
            Some(item) => refs.resolved.push(item),
            None => {
                tracing::warn!("{}: component not found: '{}'", context, name);
                refs.missing.push(name.clone());
            }
        }
    }
    refs
}

/// Direct components of an item.
pub fn resolve_components(index: &ItemIndex, item: &Item) -> ResolvedRefs {
    resolve_refs(index, recipe_refs(item), item.display_name())
}

/// Names an item is built from.
///
/// Tier-2 items without `components` fall back to `buildsFromT1`.
fn recipe_refs(item: &Item) -> &[String] {
    if item.components.is_empty() && item.tier == Some(2) {
        &item.builds_from_t1
    } else {
        &item.components
    }
}

/// One node of a recipe tree.
#[derive(Debug, Clone)]
pub struct RecipeNode {
    pub item: Arc<Item>,
    pub children: Vec<RecipeNode>,
}

/// An item's full recipe plus every reference that could not be resolved.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub root: RecipeNode,
    pub missing: Vec<String>,
}

impl Recipe {
    pub fn warning_count(&self) -> usize {
        self.missing.len()
    }
}

/// Builds the component tree beneath an item.
///
/// An item already on the current path is not expanded again, so cyclic
/// component lists terminate.
pub fn recipe_tree(index: &ItemIndex, item: Arc<Item>) -> Recipe {
    let mut missing = Vec::new();
    let mut path = HashSet::new();
    let root = expand(index, item, 0, &mut path, &mut missing);
    Recipe { root, missing }
}

fn expand(
    index: &ItemIndex,
    item: Arc<Item>,
    depth: usize,
    path: &mut HashSet<String>,
    missing: &mut Vec<String>,
) -> RecipeNode {
    let key = item.display_name().to_lowercase();
    if depth >= MAX_RECIPE_DEPTH || !path.insert(key.clone()) {
        return RecipeNode {
            item,
            children: Vec::new(),
        };
    }

    let refs = resolve_components(index, &item);
    missing.extend(refs.missing);
    let children = refs
        .resolved
        .into_iter()
        .map(|child| expand(index, child, depth + 1, path, missing))
        .collect();

    path.remove(&key);
    RecipeNode { item, children }
}

/// A build with its slots resolved against the item index.
#[derive(Debug, Clone)]
pub struct ResolvedBuild<'a> {
    pub build: &'a Build,
    pub role: Option<CanonicalRole>,
    pub starting: ResolvedRefs,
    pub final_items: ResolvedRefs,
}

impl ResolvedBuild<'_> {
    pub fn warning_count(&self) -> usize {
        self.starting.warning_count() + self.final_items.warning_count()
    }
}

/// Resolves a build's starting and final item slots and classifies its lane.
pub fn resolve_build<'a>(
    index: &ItemIndex,
    build: &'a Build,
    role_hint: Option<CanonicalRole>,
) -> ResolvedBuild<'a> {
    let label = build
        .title
        .as_deref()
        .or(build.name.as_deref())
        .unwrap_or("build");
    ResolvedBuild {
        build,
        role: classify_build_role(build, role_hint),
        starting: resolve_refs(index, &build.starting_item_names(), label),
        final_items: resolve_refs(index, &build.final_item_names(), label),
    }
}

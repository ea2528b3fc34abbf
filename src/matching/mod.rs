//! Resolution of free-text names to canonical item records.

pub mod index;
pub mod normalize;
pub mod recipe;
pub mod suggest;

pub use index::{ItemIndex, MatchTier, Resolution};
pub use recipe::{
    Recipe, RecipeNode, ResolvedBuild, ResolvedRefs, recipe_tree, resolve_build,
    resolve_components, resolve_refs,
};
pub use suggest::{NameSuggestion, suggest_items, suggest_names};

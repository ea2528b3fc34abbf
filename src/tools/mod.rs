pub mod inspect_god;
pub mod resolve_item;
pub mod search_gods;
pub mod search_items;
pub mod search_mechanics;
pub mod toggle_pin;

pub use inspect_god::*;
pub use resolve_item::*;
pub use search_gods::*;
pub use search_items::*;
pub use search_mechanics::*;
pub use toggle_pin::*;

use crate::dataset::LoadStatus;

/// Explains an empty result when the dataset itself is missing.
pub(crate) fn not_loaded_note(status: &LoadStatus) -> Option<&'static str> {
    match status {
        LoadStatus::Loaded { .. } => None,
        LoadStatus::NotLoaded | LoadStatus::Loading => Some("The dataset is still loading; try again shortly."),
        LoadStatus::Failed(_) => Some("The dataset could not be loaded; listings are empty."),
    }
}

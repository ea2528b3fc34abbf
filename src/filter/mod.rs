//! Visible-subset pipelines for gods, items and mechanics.
//!
//! Every pipeline is a pure function of the catalog slice and a query value.
//! Truncation only applies when the search text is empty.

pub mod debounce;
pub mod gods;
pub mod items;
pub mod mechanics;

pub use debounce::{DEFAULT_WINDOW, Debouncer};
pub use gods::{GodQuery, filter_gods};
pub use items::{ItemQuery, TierFilter, UnknownTier, filter_items};
pub use mechanics::{MechanicQuery, filter_mechanics};

/// Lowercased, trimmed search text; `None` when nothing is left.
fn search_text(raw: &str) -> Option<String> {
    let text = raw.trim().to_lowercase();
    (!text.is_empty()).then_some(text)
}

/// Applies the empty-search cap.
fn cap<T>(mut results: Vec<T>, searching: bool, limit: usize) -> Vec<T> {
    if !searching {
        results.truncate(limit);
    }
    results
}

//! God listing: pantheon, then lane, then name search.

use super::{cap, search_text};
use crate::dataset::God;
use crate::roles::{CanonicalRole, god_plays};

/// Parameters owned by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct GodQuery {
    /// Effective (debounced) search text.
    pub search: String,
    /// Exact pantheon name.
    pub pantheon: Option<String>,
    pub role: Option<CanonicalRole>,
}

impl GodQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Self::default()
        }
    }
}

/// Visible gods for `query`, in input order.
///
/// With no search text the result is capped at `limit`.
pub fn filter_gods<'a>(gods: &'a [God], query: &GodQuery, limit: usize) -> Vec<&'a God> {
    let search = search_text(&query.search);

    let results: Vec<&God> = gods
        .iter()
        .filter(|god| match &query.pantheon {
            Some(pantheon) => god.pantheon.as_deref() == Some(pantheon.as_str()),
            None => true,
        })
        .filter(|god| query.role.is_none_or(|role| god_plays(god, role)))
        .filter(|god| match &search {
            Some(text) => god.display_name().to_lowercase().contains(text.as_str()),
            None => true,
        })
        .collect();

    tracing::debug!(
        "God filter {:?} matched {} of {}",
        query,
        results.len(),
        gods.len()
    );

    cap(results, search.is_some(), limit)
}

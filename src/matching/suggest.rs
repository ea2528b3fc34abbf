//! "Did you mean" suggestions for references that resolve to nothing.

use super::index::ItemIndex;
use super::normalize::lower_trim;
use rapidfuzz::distance::jaro_winkler;

/// Suggestions scoring below this are noise.
pub const MIN_SUGGESTION_SCORE: f64 = 0.8;

/// A fuzzy name suggestion with relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct NameSuggestion {
    pub name: String,
    /// 0.0 to 1.0, higher is better.
    pub score: f64,
}

/// Item names most similar to `query`, best first.
pub fn suggest_items(index: &ItemIndex, query: &str, limit: usize) -> Vec<NameSuggestion> {
    suggest_names(index.items().iter().map(|item| item.display_name()), query, limit)
}

/// Candidates most similar to `query`, best first, without duplicates.
pub fn suggest_names<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    query: &str,
    limit: usize,
) -> Vec<NameSuggestion> {
    let query = lower_trim(query);
    if query.is_empty() {
        return vec![];
    }

    let mut suggestions: Vec<NameSuggestion> = candidates
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| NameSuggestion {
            name: name.to_string(),
            score: jaro_winkler::similarity(query.chars(), name.to_lowercase().chars()),
        })
        .filter(|suggestion| suggestion.score >= MIN_SUGGESTION_SCORE)
        .collect();

    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    suggestions.dedup_by(|a, b| a.name == b.name);
    suggestions.truncate(limit);
    suggestions
}

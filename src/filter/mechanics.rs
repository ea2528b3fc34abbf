//! Mechanics glossary listing.

use super::{cap, search_text};
use crate::dataset::Mechanic;

#[derive(Debug, Clone, Default)]
pub struct MechanicQuery {
    pub search: String,
    /// Exact category name.
    pub category: Option<String>,
}

/// Visible mechanics for `query`, sorted by name.
///
/// The empty-search cap is taken in dataset order before sorting, so the
/// capped window is not the alphabetically first `limit` entries.
pub fn filter_mechanics<'a>(
    mechanics: &'a [Mechanic],
    query: &MechanicQuery,
    limit: usize,
) -> Vec<&'a Mechanic> {
    let search = search_text(&query.search);

    let results: Vec<&Mechanic> = mechanics
        .iter()
        .filter(|m| match &query.category {
            Some(category) => m.category.as_deref() == Some(category.as_str()),
            None => true,
        })
        .filter(|m| {
            search.as_deref().is_none_or(|text| {
                m.name.to_lowercase().contains(text) || m.description.to_lowercase().contains(text)
            })
        })
        .collect();

    let mut results = cap(results, search.is_some(), limit);
    results.sort_by_cached_key(|m| m.name.to_lowercase());
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn mechanic(name: &str, category: &str, description: &str) -> Mechanic {
        Mechanic {
            name: name.to_string(),
            category: Some(category.to_string()),
            description: description.to_string(),
        }
    }

    fn names<'a>(mechanics: &[&'a Mechanic]) -> Vec<&'a str> {
        mechanics.iter().map(|m| m.name.as_str()).collect()
    }

    fn glossary() -> Vec<Mechanic> {
        vec![
            mechanic("Stun", "Crowd Control", "Prevents all actions"),
            mechanic("Crit", "Combat", "Critical strikes deal bonus damage"),
            mechanic("Root", "Crowd Control", "Prevents movement"),
            mechanic("Aura", "Combat", "Affects nearby gods"),
        ]
    }

    #[test]
    fn empty_glossary_stays_empty() {
        check!(filter_mechanics(&[], &MechanicQuery::default(), 30).is_empty());
    }

    #[test]
    fn category_then_search_over_description() {
        let mechanics = glossary();
        let query = MechanicQuery {
            search: "MOVEMENT".into(),
            category: Some("Crowd Control".into()),
        };
        check!(names(&filter_mechanics(&mechanics, &query, 30)) == ["Root"]);
    }

    #[test]
    fn truncates_before_sorting() {
        let mechanics = glossary();
        // first two in dataset order are Stun and Crit
        check!(names(&filter_mechanics(&mechanics, &MechanicQuery::default(), 2)) == ["Crit", "Stun"]);
    }

    #[test]
    fn search_lifts_the_cap() {
        let mechanics = glossary();
        let query = MechanicQuery {
            search: "s".into(),
            category: None,
        };
        check!(filter_mechanics(&mechanics, &query, 1).len() == 4);
    }
}

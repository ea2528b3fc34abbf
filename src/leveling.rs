//! Ability leveling orders parsed out of free-text god tips.
//!
//! Tips often document several lanes in one blob, e.g.
//! `*Jungle/Solo*: Start 2,1,3. Prioritize Maxing: 2->1->4 *Mid*: Start 1,3,2`.
//! Role-scoped markers are preferred over global patterns so each lane reads
//! its own numbers.

use crate::dataset::{God, Tip};
use crate::matching::normalize::lower_trim;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// `*Role*` or markdown-bold `**Role**`
static ROLE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{1,2}([^*\n]+)\*{1,2}").unwrap());
static START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bstart\b[ \t]*:?[ \t]*([1-4](?:[ \t]*(?:->|>|,|-)?[ \t]*[1-4])*)").unwrap()
});
static MAX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:prioritize[ \t]+maxing|\bmax(?:ing)?)\b[ \t]*:?[ \t]*([1-4](?:[ \t]*(?:->|>|,|-)?[ \t]*[1-4])*)")
        .unwrap()
});
static SLOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[1-4]").unwrap());

/// Ability slots (1-4) to level first and to max first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelingOrders {
    pub start_order: Option<Vec<u8>>,
    pub max_order: Option<Vec<u8>>,
}

/// A `*Role*` marker and the text it governs.
#[derive(Debug)]
struct RoleBlock<'a> {
    role: String,
    text: &'a str,
}

/// Reads start and max orders for `god`, preferring text about `role_hint`.
///
/// Slots whose ability the god does not have are dropped; an order that ends
/// up empty is `None`.
pub fn extract_orders(god: &God, role_hint: Option<&str>) -> LevelingOrders {
    let hint = role_hint.map(lower_trim).filter(|h| !h.is_empty());
    let Some(tip) = choose_tip(&god.tips, hint.as_deref()) else {
        tracing::debug!("{}: no leveling tip", god.display_name());
        return LevelingOrders::default();
    };

    let value = tip.value.as_str();
    let blocks = role_blocks(value);
    let start_blocks: Vec<&RoleBlock> = blocks
        .iter()
        .filter(|block| START_RE.is_match(block.text))
        .collect();

    let scoped = hint
        .as_deref()
        .and_then(|hint| start_blocks.iter().find(|block| role_matches(&block.role, hint)))
        .or(start_blocks.first())
        .copied();

    let start = match scoped {
        Some(block) => first_capture(&START_RE, block.text),
        None => first_capture(&START_RE, value),
    };

    let max = scoped
        .and_then(|block| first_capture(&MAX_RE, block.text))
        .or_else(|| first_capture(&MAX_RE, value))
        .unwrap_or_else(|| slots(value));

    LevelingOrders {
        start_order: available(god, start.unwrap_or_default()),
        max_order: available(god, max),
    }
}

/// Role-specific tip, then a generic leveling tip, then anything about leveling.
fn choose_tip<'a>(tips: &'a [Tip], hint: Option<&str>) -> Option<&'a Tip> {
    let titled = |tip: &&Tip, needle: &str| tip.title.to_lowercase().contains(needle);

    hint.and_then(|hint| {
        tips.iter().find(|tip| {
            (titled(tip, "leveling") || titled(tip, "prioritize")) && titled(tip, hint)
        })
    })
    .or_else(|| {
        tips.iter().find(|tip| {
            titled(tip, "leveling") && !titled(tip, "jungle") && !titled(tip, "solo")
        })
    })
    .or_else(|| {
        tips.iter().find(|tip| {
            let text = format!("{} {}", tip.title, tip.value).to_lowercase();
            text.contains("leveling") || text.contains("prioritize")
        })
    })
}

/// Splits `value` at every `*Role*` marker; each block runs to the next marker.
fn role_blocks(value: &str) -> Vec<RoleBlock<'_>> {
    let markers: Vec<regex::Captures<'_>> = ROLE_MARKER_RE.captures_iter(value).collect();
    markers
        .iter()
        .enumerate()
        .map(|(i, captures)| {
            let end = markers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(value.len(), |m| m.start());
            let text_start = captures.get(0).map_or(0, |m| m.end());
            RoleBlock {
                role: captures.get(1).map_or_else(String::new, |m| lower_trim(m.as_str())),
                text: &value[text_start..end],
            }
        })
        .collect()
}

/// `jungle` matches `jungle` and `jungle/solo`.
fn role_matches(role: &str, hint: &str) -> bool {
    role == hint || role.split('/').any(|part| part.trim() == hint)
}

fn first_capture(re: &Regex, text: &str) -> Option<Vec<u8>> {
    re.captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| slots(m.as_str()))
}

/// Every digit 1-4, in order of appearance.
fn slots(text: &str) -> Vec<u8> {
    SLOT_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

fn available(god: &God, order: Vec<u8>) -> Option<Vec<u8>> {
    let order: Vec<u8> = order
        .into_iter()
        .filter(|slot| god.ability(*slot).is_some())
        .collect();
    (!order.is_empty()).then_some(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn god_with_tips(tips: Value) -> God {
        God::from_value(&json!({
            "name": "Fenrir",
            "abilities": {
                "A01": {"name": "Unchained"},
                "A02": {"name": "Seething Howl"},
                "A03": {"name": "Brutalize"},
                "A04": {"name": "Ragnarok"},
            },
            "tips": tips,
        }))
        .unwrap()
    }

    #[test]
    fn combined_role_marker() {
        let god = god_with_tips(json!([{
            "title": "Leveling order (Jungle/Solo)",
            "value": "*Jungle/Solo*: Start 2,1,3. Prioritize Maxing: 2->1->4",
        }]));

        let orders = extract_orders(&god, Some("solo"));
        check!(orders.start_order == Some(vec![2, 1, 3]));
        check!(orders.max_order == Some(vec![2, 1, 4]));
    }

    #[rstest]
    #[case(Some("jungle"), vec![2, 1, 3])]
    #[case(Some("mid"), vec![1, 3, 2])]
    fn bold_role_markers_scope_blocks(#[case] hint: Option<&str>, #[case] start: Vec<u8>) {
        let god = god_with_tips(json!([{
            "title": "Leveling",
            "value": "**Jungle**: Start 2,1,3 **Mid**: Start 1,3,2",
        }]));

        check!(extract_orders(&god, hint).start_order == Some(start));
    }

    #[rstest]
    #[case(Some("mid"), vec![1, 3, 2], vec![1, 3, 4])]
    #[case(Some("jungle"), vec![2, 1, 3], vec![2, 1, 4])]
    #[case(Some("support"), vec![2, 1, 3], vec![2, 1, 4])]
    #[case(None, vec![2, 1, 3], vec![2, 1, 4])]
    fn picks_the_hinted_block(
        #[case] hint: Option<&str>,
        #[case] start: Vec<u8>,
        #[case] max: Vec<u8>,
    ) {
        let god = god_with_tips(json!([{
            "title": "Leveling",
            "value": "*Jungle*: Start 2,1,3. Prioritize Maxing: 2->1->4 \
                      *Mid*: Start 1,3,2. Prioritize Maxing: 1->3->4",
        }]));

        let orders = extract_orders(&god, hint);
        check!(orders.start_order == Some(start));
        check!(orders.max_order == Some(max));
    }

    #[test]
    fn max_falls_back_to_global_search() {
        let god = god_with_tips(json!([{
            "title": "Leveling",
            "value": "*Solo*: Start 3,1,2. Max 1 -> 3 -> 2 in every lane",
        }]));
        let orders = extract_orders(&god, Some("solo"));
        check!(orders.max_order == Some(vec![1, 3, 2]));

        let god = god_with_tips(json!([{
            "title": "Leveling",
            "value": "*Solo*: Start 3,1,2. *Notes*: none. Max 1 -> 3 -> 2",
        }]));
        let orders = extract_orders(&god, Some("solo"));
        check!(orders.start_order == Some(vec![3, 1, 2]));
        check!(orders.max_order == Some(vec![1, 3, 2]));
    }

    #[test]
    fn bare_start_without_markers() {
        let god = god_with_tips(json!([{
            "title": "General leveling",
            "value": "Start: 1, 2, 3 and take ult at 5",
        }]));
        let orders = extract_orders(&god, None);
        check!(orders.start_order == Some(vec![1, 2, 3]));
        // no max keyword: every slot digit in the text
        check!(orders.max_order == Some(vec![1, 2, 3]));
    }

    #[test]
    fn generic_tip_skips_lane_specific_titles() {
        let god = god_with_tips(json!([
            {"title": "Jungle leveling", "value": "Start 3,2,1"},
            {"title": "Leveling", "value": "Start 1,2,3"},
        ]));
        check!(extract_orders(&god, None).start_order == Some(vec![1, 2, 3]));
        check!(extract_orders(&god, Some("jungle")).start_order == Some(vec![3, 2, 1]));
    }

    #[test]
    fn last_resort_tip_mentions_prioritize() {
        let god = god_with_tips(json!([
            {"title": "Combos", "value": "1 into 3"},
            {"title": "Farming", "value": "Prioritize maxing 3 > 1, then 2"},
        ]));
        let orders = extract_orders(&god, None);
        check!(orders.start_order.is_none());
        check!(orders.max_order == Some(vec![3, 1]));
    }

    #[test]
    fn drops_slots_without_abilities() {
        let god = God::from_value(&json!({
            "name": "Ratatoskr",
            "abilities": {"A01": {}, "A02": {}},
            "tips": [{"title": "Leveling", "value": "Start 1,3,2"}],
        }))
        .unwrap();
        check!(extract_orders(&god, None).start_order == Some(vec![1, 2]));
    }

    #[test]
    fn no_tips_no_orders() {
        let god = god_with_tips(json!([]));
        check!(extract_orders(&god, Some("mid")) == LevelingOrders::default());
    }
}

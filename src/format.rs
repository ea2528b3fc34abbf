//! Plain-text rendering shared by the tool handlers.

use crate::assets::ResolvedAsset;
use crate::dataset::{God, Item};
use crate::roles::{classify_god_roles, display_order};
use std::fmt::Write as _;

/// `12`, `0.5`, `1234.57`: integers without a trailing `.0`.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// A god's roles in display order, comma separated.
pub fn god_roles(god: &God) -> String {
    display_order(classify_god_roles(god))
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Short tag list such as `Tier 3, 2800 gold, active`.
pub fn item_tags(item: &Item) -> String {
    let mut tags = Vec::new();
    if let Some(tier) = item.tier {
        tags.push(format!("Tier {tier}"));
    }
    if let Some(cost) = item.total_cost.filter(|c| *c > 0.0) {
        tags.push(format!("{} gold", number(cost)));
    } else if let Some(cost) = item.step_cost.filter(|c| *c > 0.0) {
        tags.push(format!("{} gold", number(cost)));
    }
    for (flag, label) in [
        (item.starter, "starter"),
        (item.active, "active"),
        (item.relic, "relic"),
        (item.consumable, "consumable"),
        (item.god_specific, "god specific"),
    ] {
        if flag {
            tags.push(label.to_string());
        }
    }
    tags.join(", ")
}

/// `2 > 1 > 3`, or `unknown`.
pub fn slot_order(order: Option<&[u8]>) -> String {
    match order {
        Some(order) => order
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(" > "),
        None => "unknown".to_string(),
    }
}

pub fn asset(out: &mut String, label: &str, asset: Option<&ResolvedAsset>) {
    let Some(asset) = asset else {
        return;
    };
    let _ = write!(out, "{}: {}", label, asset.primary);
    if let Some(fallback) = &asset.fallback {
        let _ = write!(out, " (fallback: {})", fallback);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(2800.0, "2800")]
    #[case(0.5, "0.5")]
    #[case(1.257, "1.26")]
    #[case(-3.0, "-3")]
    fn numbers(#[case] value: f64, #[case] expected: &str) {
        check!(number(value) == expected);
    }

    #[test]
    fn item_tags_list_cost_and_flags() {
        let item = Item::from_value(&json!({
            "name": "Beads", "tier": 2, "totalCost": 1200, "active": true,
        }))
        .unwrap();
        check!(item_tags(&item) == "Tier 2, 1200 gold, active");
    }

    #[test]
    fn god_roles_in_display_order() {
        let god = God::from_value(&json!({"name": "Ares", "roles": ["Guardian", "jungle", "Solo"]})).unwrap();
        check!(god_roles(&god) == "Solo, Jungle, Guardian");
    }

    #[test]
    fn slot_orders() {
        check!(slot_order(Some(&[2, 1, 3])) == "2 > 1 > 3");
        check!(slot_order(None) == "unknown");
    }
}

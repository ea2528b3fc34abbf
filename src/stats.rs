//! Base-stat interpolation between the level 1 and level 20 values.

use crate::dataset::God;
use crate::dataset::model::as_number;
use serde_json::Value;
use std::collections::BTreeMap;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;

/// Value of one stat at `level`, clamped to 1..=20.
///
/// Linear between the level-1 and level-20 entries; a stat with only one of
/// them is flat.
pub fn stat_at_level(levels: &BTreeMap<String, Value>, level: u8) -> Option<f64> {
    let at = |key: u8| levels.get(&key.to_string()).and_then(as_number);
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);

    match (at(MIN_LEVEL), at(MAX_LEVEL)) {
        (Some(first), Some(last)) => {
            let progress = f64::from(level - MIN_LEVEL) / f64::from(MAX_LEVEL - MIN_LEVEL);
            Some((last - first).mul_add(progress, first))
        }
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

/// Every base stat of `god` at `level`.
pub fn god_stats_at_level(god: &God, level: u8) -> BTreeMap<String, f64> {
    god.base_stats
        .iter()
        .filter_map(|(name, levels)| stat_at_level(levels, level).map(|value| (name.clone(), value)))
        .collect()
}

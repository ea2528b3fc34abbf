mod common;

use assert2::{check, let_assert};
use common::{TestCodex, codex, empty_codex};
use pantheon_codex::tools::{
    InspectGodRequest, ResolveItemRequest, SearchGodsRequest, SearchItemsRequest,
    SearchMechanicsRequest, handle_inspect_god, handle_resolve_item, handle_search_gods,
    handle_search_items, handle_search_mechanics,
};
use rstest::rstest;

// --- search_gods ---

#[rstest]
#[tokio::test]
async fn lists_gods_in_dataset_order(codex: TestCodex) {
    let_assert!(Ok(output) = handle_search_gods(&codex.context, SearchGodsRequest::default()).await);
    check!(output.starts_with("Gods (3 of 3):"));
    check!(output.contains("• Fenrir (Norse) · Jungle, Assassin\n"));
    check!(output.contains("• Zeus (Greek) · Mid\n"));

    let fenrir = output.find("Fenrir").unwrap();
    let ares = output.find("Ares").unwrap();
    check!(fenrir < ares);
}

#[rstest]
#[tokio::test]
async fn role_filter_uses_build_notes(codex: TestCodex) {
    let request = SearchGodsRequest {
        role: Some("solo".to_string()),
        ..SearchGodsRequest::default()
    };
    let_assert!(Ok(output) = handle_search_gods(&codex.context, request).await);
    check!(output.contains("Fenrir"));
    check!(!output.contains("Zeus"));
}

#[rstest]
#[tokio::test]
async fn unknown_role_is_rejected(codex: TestCodex) {
    let request = SearchGodsRequest {
        role: Some("Tank".to_string()),
        ..SearchGodsRequest::default()
    };
    let_assert!(Err(message) = handle_search_gods(&codex.context, request).await);
    check!(message.contains("unknown role 'Tank'"));
}

#[rstest]
#[tokio::test]
async fn unloaded_dataset_lists_nothing(empty_codex: TestCodex) {
    let_assert!(Ok(output) = handle_search_gods(&empty_codex.context, SearchGodsRequest::default()).await);
    check!(output.starts_with("No gods match."));
    check!(output.contains("still loading"));
}

// --- search_items ---

#[rstest]
#[tokio::test]
async fn item_search_ignores_punctuation(codex: TestCodex) {
    let request = SearchItemsRequest {
        query: Some("sword-of".to_string()),
        ..SearchItemsRequest::default()
    };
    let_assert!(Ok(output) = handle_search_items(&codex.context, request).await);
    check!(output.starts_with("Items (1 of 9):"));
    check!(output.contains("• Sword of the Magi [Tier 3, 2800 gold] · Physical Power"));
}

#[rstest]
#[case("Tier 2", &["Potion", "Purification Beads", "Short Sword"])]
#[case("God Specific", &["Acorn of Yggdrasil"])]
#[case("Consumable", &["Healing Potion"])]
#[tokio::test]
async fn tier_tags_filter_items(codex: TestCodex, #[case] tier: &str, #[case] expected: &[&str]) {
    let request = SearchItemsRequest {
        tier: Some(tier.to_string()),
        ..SearchItemsRequest::default()
    };
    let_assert!(Ok(output) = handle_search_items(&codex.context, request).await);
    let names: Vec<&str> = output
        .lines()
        .filter_map(|line| line.strip_prefix("• "))
        .map(|line| line.split(" [").next().unwrap_or(line))
        .map(|line| line.split(" · ").next().unwrap_or(line))
        .collect();
    check!(names == expected);
}

#[rstest]
#[tokio::test]
async fn bad_tier_lists_valid_tags(codex: TestCodex) {
    let request = SearchItemsRequest {
        tier: Some("Mythic".to_string()),
        ..SearchItemsRequest::default()
    };
    let_assert!(Err(message) = handle_search_items(&codex.context, request).await);
    check!(message.contains("God Specific"));
}

// --- search_mechanics ---

#[rstest]
#[tokio::test]
async fn mechanics_glossary_is_unpopulated(codex: TestCodex) {
    let_assert!(
        Ok(output) = handle_search_mechanics(&codex.context, SearchMechanicsRequest::default()).await
    );
    check!(output.starts_with("No mechanics match."));
    check!(output.contains("Crowd Control (2)"));
}

// --- resolve_item ---

#[rstest]
#[tokio::test]
async fn resolves_loose_names_with_recipe(codex: TestCodex) {
    let request = ResolveItemRequest {
        name: "swordofthemagi".to_string(),
    };
    let_assert!(Ok(output) = handle_resolve_item(&codex.context, request).await);
    check!(output.starts_with("Sword of the Magi (ItemSwordMagi)"));
    check!(output.contains("Matched by: name without punctuation"));
    check!(output.contains("Icon: https://cdn.test/items/magi.png (fallback: https://mirror.test/items/magi.png)"));
    check!(output.contains("Recipe:\n  • Short Sword (T2)\n    • Sword (T1)\n"));
}

#[rstest]
#[tokio::test]
async fn reports_unresolved_components(codex: TestCodex) {
    let request = ResolveItemRequest {
        name: "Potion".to_string(),
    };
    let_assert!(Ok(output) = handle_resolve_item(&codex.context, request).await);
    check!(output.contains("• Lesser Potion (T1)"));
    check!(output.contains("Unresolved components (1): Unknown Ghost Item"));
}

#[rstest]
#[tokio::test]
async fn suggests_close_names(codex: TestCodex) {
    let request = ResolveItemRequest {
        name: "Hydras Lamnet".to_string(),
    };
    let_assert!(Ok(output) = handle_resolve_item(&codex.context, request).await);
    check!(output.starts_with("No item matches 'Hydras Lamnet'."));
    check!(output.contains("• Hydra's Lament"));
}

// --- inspect_god ---

#[rstest]
#[tokio::test]
async fn inspect_god_for_a_lane(codex: TestCodex) {
    let request = InspectGodRequest {
        name: "fenrir".to_string(),
        role: Some("Solo".to_string()),
        level: Some(20),
    };
    let_assert!(Ok(output) = handle_inspect_god(&codex.context, request).await);
    check!(output.starts_with("Fenrir, The Unbound (Norse)\n"));
    check!(output.contains("Roles: Jungle, Assassin\n"));
    check!(output.contains("Build lanes: Solo, Jungle\n"));
    check!(output.contains("Icon: https://cdn.test/gods/fenrir.png\n"));
    check!(output.contains("  A01 Unchained: Leap forward.\n"));
    check!(output.contains("Leveling (Solo): start 2 > 1 > 3, max 2 > 1 > 4\n"));
    check!(output.contains("Stats at level 20: Health 1980, Physical Power 76\n"));
    check!(output.contains("  [Solo] Lane bully\n"));
    check!(output.contains("    Unresolved: Typo Bladee\n"));
    check!(!output.contains("Jungle Assassin"));
}

#[rstest]
#[tokio::test]
async fn inspect_god_without_lane_shows_every_build(codex: TestCodex) {
    let request = InspectGodRequest {
        name: "Fenrir".to_string(),
        role: None,
        level: None,
    };
    let_assert!(Ok(output) = handle_inspect_god(&codex.context, request).await);
    check!(output.contains("Stats at level 1: Health 460, Physical Power 38\n"));
    check!(output.contains("  [Jungle] Jungle Assassin\n    Start: Bumba's Hammer\n"));
    check!(output.contains("  [Solo] Lane bully\n"));
}

#[rstest]
#[tokio::test]
async fn inspect_unknown_god_suggests(codex: TestCodex) {
    let request = InspectGodRequest {
        name: "Fenrri".to_string(),
        role: None,
        level: None,
    };
    let_assert!(Ok(output) = handle_inspect_god(&codex.context, request).await);
    check!(output.starts_with("No god named 'Fenrri'."));
    check!(output.contains("• Fenrir"));
}

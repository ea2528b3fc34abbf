mod common;

use assert2::{check, let_assert};
use common::{TestCodex, codex};
use pantheon_codex::pins::PinStore;
use pantheon_codex::storage::FileStorage;
use pantheon_codex::tools::{TogglePinRequest, handle_toggle_pin};
use rstest::rstest;
use std::sync::Arc;

fn toggle(name: &str, user: Option<&str>) -> TogglePinRequest {
    TogglePinRequest {
        name: name.to_string(),
        user: user.map(str::to_string),
    }
}

#[rstest]
#[tokio::test]
async fn pins_round_trip_through_storage(codex: TestCodex) {
    let_assert!(Ok(output) = handle_toggle_pin(&codex.context, toggle("zeus", Some("ana"))).await);
    check!(output.starts_with("Pinned Zeus for ana."));

    let_assert!(Ok(output) = handle_toggle_pin(&codex.context, toggle("Fenrir", Some("ana"))).await);
    check!(output.contains("Pinned gods:\n• Zeus\n• Fenrir\n"));

    // persistence is fire-and-forget; wait for both writes to land
    let mut raw = String::new();
    for _ in 0..100 {
        raw = std::fs::read_to_string(codex.storage_path()).unwrap_or_default();
        if raw.contains("Fenrir") && raw.contains("currentUser") {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    check!(raw.contains("pinnedGods_ana"));

    // a fresh store sees the persisted state
    let reopened = PinStore::new(Arc::new(FileStorage::new(codex.storage_path())));
    check!(reopened.current_user().await == "ana");
    let names: Vec<String> = reopened
        .pinned("ana")
        .await
        .iter()
        .map(|p| p.display_name().to_string())
        .collect();
    check!(names == ["Zeus", "Fenrir"]);
}

#[rstest]
#[tokio::test]
async fn toggling_twice_unpins(codex: TestCodex) {
    let pins = codex.context.pins();
    let catalog = codex.context.catalog().await;
    let_assert!(Some(ares) = catalog.god("Ares"));

    pins.toggle_pin("bo", ares).await.persist.await.unwrap();
    let second = pins.toggle_pin("bo", ares).await;
    check!(!second.is_pinned);
    second.persist.await.unwrap();
    check!(pins.pinned("bo").await.is_empty());
}

#[rstest]
#[tokio::test]
async fn unknown_god_is_an_error(codex: TestCodex) {
    let_assert!(Err(message) = handle_toggle_pin(&codex.context, toggle("Odin", None)).await);
    check!(message == "No god named 'Odin'.");
}

#[rstest]
#[tokio::test]
async fn default_user_without_stored_user(codex: TestCodex) {
    let_assert!(Ok(output) = handle_toggle_pin(&codex.context, toggle("Ares", None)).await);
    check!(output.starts_with("Pinned Ares for default."));
}

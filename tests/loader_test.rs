mod common;

use assert2::{check, let_assert};
use pantheon_codex::{CatalogState, LoadStatus};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn background_load_populates_the_catalog() {
    let state = Arc::new(CatalogState::new());
    check!(state.catalog().await.gods().is_empty());

    let handle = state.spawn_load(common::dataset_path());
    check!(handle.await.unwrap());

    let_assert!(LoadStatus::Loaded { gods, items, .. } = state.status().await);
    check!(gods == 3);
    check!(items == 9);
}

#[tokio::test]
async fn reloading_same_bytes_keeps_the_index() {
    let state = CatalogState::new();
    check!(state.load(&common::dataset_path()).await);
    let first = state.catalog().await;

    check!(state.load(&common::dataset_path()).await);
    check!(Arc::ptr_eq(&first, &state.catalog().await));
}

#[tokio::test]
async fn changed_bytes_rebuild_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("builds.json");
    std::fs::copy(common::dataset_path(), &path).unwrap();

    let state = CatalogState::new();
    check!(state.load(&path).await);
    let first = state.catalog().await;

    std::fs::write(&path, r#"{"gods": [{"name": "Thor"}], "items": []}"#).unwrap();
    check!(state.load(&path).await);
    let second = state.catalog().await;
    check!(!Arc::ptr_eq(&first, &second));
    check!(second.god("thor").is_some());
    check!(second.items().is_empty());
}

#[tokio::test]
async fn invalid_dataset_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("builds.json");
    std::fs::write(&path, "not json").unwrap();

    let state = CatalogState::new();
    check!(!state.load(&path).await);
    let_assert!(LoadStatus::Failed(reason) = state.status().await);
    check!(reason.contains("Failed to parse dataset"));
    check!(state.catalog().await.is_empty());
}

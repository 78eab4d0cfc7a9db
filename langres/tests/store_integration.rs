//! Store round-trips through a real resource file.

use std::collections::BTreeMap;

use langres::{
    Locale, NewResource, Product, ResourcePatch, ResourceStatus, ResourceStore, SearchQuery,
    health_report, search,
};
use tempfile::TempDir;

fn new_resource(key: &str, korean: &str, english: &str) -> NewResource {
    let mut translations = BTreeMap::new();
    translations.insert(Locale::KoKr, korean.to_string());
    if !english.is_empty() {
        translations.insert(Locale::EnUs, english.to_string());
    }
    NewResource {
        key: key.to_string(),
        products: vec![Product::Knox],
        translations,
        author: "designer1".to_string(),
        ..NewResource::default()
    }
}

#[test]
fn insert_update_delete_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resources.json");
    std::fs::write(&path, "[]").unwrap();

    let mut store = ResourceStore::open(&path);
    let inserted = store
        .insert(new_resource("login.button", "로그인", "Log In"))
        .unwrap();
    assert_eq!(inserted.id, "1");
    assert_eq!(inserted.status, ResourceStatus::Draft);

    let mut translations = BTreeMap::new();
    translations.insert(Locale::ZhCn, "登录".to_string());
    store
        .update(
            "1",
            ResourcePatch {
                translations,
                status: Some(ResourceStatus::Approved),
                ..ResourcePatch::default()
            },
        )
        .unwrap();

    // A second store over the same file observes everything.
    let mut reopened = ResourceStore::open(&path);
    let resources = reopened.load().unwrap().to_vec();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].translation(Locale::ZhCn), Some("登录"));
    assert_eq!(resources[0].status, ResourceStatus::Approved);
    assert_eq!(resources[0].translation(Locale::KoKr), Some("로그인"));

    store.delete("1").unwrap();
    reopened.invalidate();
    assert!(reopened.load().unwrap().is_empty());
}

#[test]
fn store_feeds_search_and_health() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resources.json");
    std::fs::write(&path, "[]").unwrap();

    let mut store = ResourceStore::open(&path);
    store
        .insert(new_resource("login.button", "로그인", "Log In"))
        .unwrap();
    store
        .insert(new_resource("save.button", "저장", "Save"))
        .unwrap();

    let resources = store.load().unwrap().to_vec();

    let results = search(
        &resources,
        &SearchQuery {
            query: Some("save".to_string()),
            ..SearchQuery::default()
        },
    );
    assert_eq!(results.total, 1);
    assert_eq!(results.data[0].key, "save.button");

    // Both inserts default to draft: 100 - 2/2 * 10 = 90.
    let report = health_report(&resources, None);
    assert_eq!(report.health_score, 90);
}

#[test]
fn persisted_file_is_one_json_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resources.json");
    std::fs::write(&path, "[]").unwrap();

    let mut store = ResourceStore::open(&path);
    store
        .insert(new_resource("login.button", "로그인", "Log In"))
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["key"], "login.button");
    assert_eq!(value[0]["translations"]["ko-KR"], "로그인");
    assert_eq!(value[0]["metadata"]["author"], "designer1");
}

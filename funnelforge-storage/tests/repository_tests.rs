use funnelforge_model::{ElementKind, ElementPatch, Page, PageTemplate};
use funnelforge_storage::{
    FileStore, KeyValueStore, MemoryStore, PageRepository, RepositoryConfig, SaveKind,
    StorageError,
};
use funnelforge_types::PageId;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;

fn memory_repo() -> (Arc<MemoryStore>, PageRepository) {
    let store = Arc::new(MemoryStore::new());
    let repo = PageRepository::new(store.clone());
    (store, repo)
}

fn sample_page(name: &str) -> Page {
    let mut page = Page::new(name, "landing-page");
    let heading = page.add(ElementKind::Heading);
    page.add(ElementKind::Text);
    page.add(ElementKind::Button);
    page.update(&heading, &ElementPatch::new().set_content("text", name))
        .unwrap();
    page
}

// ── Save / list ──────────────────────────────────────────────────

#[test]
fn empty_store_lists_nothing() {
    let (_, repo) = memory_repo();
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn save_appends_then_replaces() {
    let (_, repo) = memory_repo();
    let mut page = sample_page("A");
    assert_eq!(repo.save(&page).unwrap(), SaveKind::Inserted);

    page.name = "A (renamed)".into();
    assert_eq!(repo.save(&page).unwrap(), SaveKind::Replaced);

    let pages = repo.list().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].name, "A (renamed)");
}

#[test]
fn save_keeps_other_records_in_order() {
    let (_, repo) = memory_repo();
    let a = sample_page("A");
    let b = sample_page("B");
    let c = sample_page("C");
    repo.save(&a).unwrap();
    repo.save(&b).unwrap();
    repo.save(&c).unwrap();
    repo.save(&b).unwrap();

    let names: Vec<_> = repo.list().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn roundtrip_preserves_element_sequence() {
    let (_, repo) = memory_repo();
    let page = PageTemplate::ProductLaunch.instantiate("Launch");
    repo.save(&page).unwrap();

    let loaded = repo.get(&page.id).unwrap().unwrap();
    assert_eq!(loaded.elements.elements(), page.elements.elements());
    assert_eq!(loaded, page);
}

#[test]
fn collection_is_a_json_array_under_the_key() {
    let (store, repo) = memory_repo();
    repo.save(&sample_page("A")).unwrap();
    let raw = store.get("funnels").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["status"], "draft");
}

#[test]
fn custom_collection_key() {
    let store = Arc::new(MemoryStore::new());
    let repo = PageRepository::with_config(
        store.clone(),
        RepositoryConfig {
            collection_key: "pages".into(),
        },
    );
    repo.save(&sample_page("A")).unwrap();
    assert!(store.get("pages").unwrap().is_some());
    assert!(store.get("funnels").unwrap().is_none());
}

// ── Get / delete ─────────────────────────────────────────────────

#[test]
fn get_missing_is_none() {
    let (_, repo) = memory_repo();
    repo.save(&sample_page("A")).unwrap();
    assert!(repo.get(&PageId::new()).unwrap().is_none());
}

#[test]
fn delete_removes_only_target() {
    let (_, repo) = memory_repo();
    let a = sample_page("A");
    let b = sample_page("B");
    repo.save(&a).unwrap();
    repo.save(&b).unwrap();

    assert!(repo.delete(&a.id).unwrap());
    assert!(!repo.delete(&a.id).unwrap());
    let pages = repo.list().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].id, b.id);
}

// ── Failure modes ────────────────────────────────────────────────

/// Stores `good` next to a record whose heading level is a string.
fn collection_with_bad_record(store: &MemoryStore, good: &Page) -> serde_json::Value {
    let mut bad = serde_json::to_value(sample_page("Bad")).unwrap();
    bad["elements"][0]["content"]["level"] = serde_json::json!("2");
    let raw = serde_json::json!([bad.clone(), serde_json::to_value(good).unwrap()]);
    store.set("funnels", &raw.to_string()).unwrap();
    bad
}

fn stored_records(store: &MemoryStore) -> Vec<serde_json::Value> {
    serde_json::from_str(&store.get("funnels").unwrap().unwrap()).unwrap()
}

#[test]
fn unreadable_record_is_skipped_by_list_and_get() {
    let (store, repo) = memory_repo();
    let good = sample_page("Good");
    let bad = collection_with_bad_record(&store, &good);

    let pages = repo.list().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0], good);
    assert_eq!(repo.get(&good.id).unwrap().unwrap(), good);

    let bad_id: PageId = bad["id"].as_str().unwrap().parse().unwrap();
    assert!(repo.get(&bad_id).unwrap().is_none());
}

#[test]
fn unreadable_record_survives_save_and_delete() {
    let (store, repo) = memory_repo();
    let good = sample_page("Good");
    let bad = collection_with_bad_record(&store, &good);

    let fresh = sample_page("Fresh");
    assert_eq!(repo.save(&fresh).unwrap(), SaveKind::Inserted);
    assert!(repo.delete(&good.id).unwrap());

    let records = stored_records(&store);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], bad);
    assert_eq!(records[1]["id"], fresh.id.as_str());
}

#[test]
fn non_uuid_page_id_loads() {
    let (store, repo) = memory_repo();
    let mut record = serde_json::to_value(sample_page("Imported")).unwrap();
    record["id"] = serde_json::json!("funnel-7");
    store
        .set("funnels", &serde_json::json!([record]).to_string())
        .unwrap();

    let id: PageId = "funnel-7".parse().unwrap();
    let page = repo.get(&id).unwrap().unwrap();
    assert_eq!(page.id.as_str(), "funnel-7");
    assert_eq!(page.name, "Imported");
}

#[test]
fn corrupt_collection_is_a_serialization_error() {
    let (store, repo) = memory_repo();
    store.set("funnels", "{not json").unwrap();
    assert!(matches!(repo.list(), Err(StorageError::Serialization(_))));
}

#[test]
fn file_backed_repository_roundtrip() {
    let dir = TempDir::new().unwrap();
    let page = sample_page("Disk");
    {
        let repo = PageRepository::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        repo.save(&page).unwrap();
    }
    let repo = PageRepository::new(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert_eq!(repo.get(&page.id).unwrap().unwrap(), page);
}

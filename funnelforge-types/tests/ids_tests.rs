use funnelforge_types::{ElementId, Error, PageId};
use proptest::prelude::*;
use std::collections::HashSet;

// ── ElementId ────────────────────────────────────────────────────

#[test]
fn element_ids_are_unique() {
    let ids: HashSet<ElementId> = (0..1000).map(|_| ElementId::new()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn element_id_display_parse_roundtrip() {
    let id = ElementId::new();
    let parsed: ElementId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn fresh_element_id_is_uuid_text() {
    let id = ElementId::new();
    assert_eq!(id.as_str().len(), 36);
    assert_eq!(id.as_str().matches('-').count(), 4);
}

#[test]
fn element_id_accepts_any_non_empty_string() {
    let id = ElementId::parse("hero-heading").unwrap();
    assert_eq!(id.as_str(), "hero-heading");
    assert_eq!(id.to_string(), "hero-heading");
}

#[test]
fn element_id_rejects_blank() {
    assert!(matches!(ElementId::parse(""), Err(Error::InvalidId(_))));
    assert!(ElementId::parse("   ").is_err());
}

#[test]
fn element_id_serializes_as_plain_string() {
    let id = ElementId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
}

#[test]
fn non_uuid_id_loads_and_saves_unchanged() {
    let id: ElementId = serde_json::from_str("\"el_42\"").unwrap();
    assert_eq!(id.as_str(), "el_42");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"el_42\"");
}

#[test]
fn empty_id_fails_to_load() {
    assert!(serde_json::from_str::<ElementId>("\"\"").is_err());
}

#[test]
fn element_ids_are_time_ordered() {
    let a = ElementId::new();
    let b = ElementId::new();
    assert!(a < b);
}

// ── PageId ───────────────────────────────────────────────────────

#[test]
fn page_id_display_parse_roundtrip() {
    let id = PageId::new();
    assert_eq!(PageId::parse(&id.to_string()).unwrap(), id);
}

#[test]
fn page_id_default_is_fresh() {
    assert_ne!(PageId::default(), PageId::default());
}

proptest! {
    #[test]
    fn any_non_blank_string_survives_json(raw in "[a-zA-Z0-9_-]{1,40}") {
        let id = PageId::parse(&raw).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: PageId = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.as_str(), raw.as_str());
        prop_assert_eq!(back, id);
    }
}

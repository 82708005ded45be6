use funnelforge_model::{ElementKind, ElementPatch, ElementStore, VisualElement};
use funnelforge_types::ElementId;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = ElementKind> {
    prop::sample::select(ElementKind::ALL.to_vec())
}

// ── add ──────────────────────────────────────────────────────────

#[test]
fn add_appends_in_order() {
    let mut store = ElementStore::new();
    let a = store.add(ElementKind::Heading);
    let b = store.add(ElementKind::Text);
    let c = store.add(ElementKind::Button);
    let order: Vec<_> = store.iter().map(|e| e.id.clone()).collect();
    assert_eq!(order, vec![a, b, c]);
}

#[test]
fn add_element_replaces_colliding_id() {
    let mut store = ElementStore::new();
    let first = store.add(ElementKind::Text);
    let mut clash = VisualElement::new(ElementKind::Button);
    clash.id = first.clone();
    let second = store.add_element(clash);
    assert_ne!(first, second);
    assert_eq!(store.len(), 2);
}

#[test]
fn from_elements_dedupes_ids() {
    let a = VisualElement::new(ElementKind::Text);
    let mut b = VisualElement::new(ElementKind::Heading);
    b.id = a.id.clone();
    let store = ElementStore::from_elements(vec![a, b]);
    assert_eq!(store.ids().len(), 2);
}

// ── update ───────────────────────────────────────────────────────

#[test]
fn update_merges_patch() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Heading);
    let updated = store
        .update(&id, &ElementPatch::new().set_content("text", "Welcome"))
        .unwrap();
    assert!(updated);
    assert_eq!(store.get(&id).unwrap().content.text(), Some("Welcome"));
}

#[test]
fn update_absent_id_is_silently_ignored() {
    let mut store = ElementStore::new();
    store.add(ElementKind::Heading);
    let before = store.clone();
    let revision = store.revision();
    let updated = store
        .update(&ElementId::new(), &ElementPatch::new().set_content("text", "x"))
        .unwrap();
    assert!(!updated);
    assert_eq!(store, before);
    assert_eq!(store.revision(), revision);
}

#[test]
fn failed_update_does_not_bump_revision() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Heading);
    let revision = store.revision();
    assert!(store
        .update(&id, &ElementPatch::new().set_content("nope", 1))
        .is_err());
    assert_eq!(store.revision(), revision);
}

// ── remove ───────────────────────────────────────────────────────

#[test]
fn remove_then_update_is_noop() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Text);
    assert!(store.remove(&id));
    let updated = store
        .update(&id, &ElementPatch::new().set_content("text", "ghost"))
        .unwrap();
    assert!(!updated);
    assert!(store.is_empty());
}

#[test]
fn remove_is_idempotent() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Text);
    assert!(store.remove(&id));
    assert!(!store.remove(&id));
    assert!(store.is_empty());
}

#[test]
fn heading_button_remove_heading_leaves_button() {
    let mut store = ElementStore::new();
    let heading = store.add(ElementKind::Heading);
    let button = store.add(ElementKind::Button);
    store.remove(&heading);
    assert_eq!(store.len(), 1);
    assert_eq!(store.elements()[0].id, button);
    assert_eq!(store.elements()[0].kind(), ElementKind::Button);
}

// ── select ───────────────────────────────────────────────────────

#[test]
fn select_then_remove_clears_selection() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Image);
    assert!(store.select(Some(id.clone())));
    assert_eq!(store.selected(), Some(&id));
    store.remove(&id);
    assert_eq!(store.selected(), None);
    assert!(store.selected_element().is_none());
}

#[test]
fn removing_other_element_keeps_selection() {
    let mut store = ElementStore::new();
    let keep = store.add(ElementKind::Image);
    let drop = store.add(ElementKind::Text);
    store.select(Some(keep.clone()));
    store.remove(&drop);
    assert_eq!(store.selected(), Some(&keep));
}

#[test]
fn select_none_clears() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Text);
    store.select(Some(id));
    assert!(store.select(None));
    assert_eq!(store.selected(), None);
}

#[test]
fn select_absent_id_is_ignored() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Text);
    store.select(Some(id.clone()));
    assert!(!store.select(Some(ElementId::new())));
    assert_eq!(store.selected(), Some(&id));
}

// ── containers ───────────────────────────────────────────────────

#[test]
fn children_are_reachable_by_id() {
    let mut store = ElementStore::new();
    let container = store.add(ElementKind::Container);
    let child = store.add_child(&container, ElementKind::Button).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&child).unwrap().kind(), ElementKind::Button);

    store
        .update(&child, &ElementPatch::new().set_content("label", "Go"))
        .unwrap();
    assert_eq!(store.get(&child).unwrap().content.text(), Some("Go"));
}

#[test]
fn add_child_requires_container() {
    let mut store = ElementStore::new();
    let text = store.add(ElementKind::Text);
    assert!(store.add_child(&text, ElementKind::Button).is_none());
    assert!(store.add_child(&ElementId::new(), ElementKind::Button).is_none());
}

#[test]
fn removing_container_clears_selected_child() {
    let mut store = ElementStore::new();
    let container = store.add(ElementKind::Container);
    let child = store.add_child(&container, ElementKind::Text).unwrap();
    store.select(Some(child.clone()));
    store.remove(&container);
    assert_eq!(store.selected(), None);
    assert!(!store.contains(&child));
}

// ── reorder & duplicate ──────────────────────────────────────────

#[test]
fn move_to_reorders_and_clamps() {
    let mut store = ElementStore::new();
    let a = store.add(ElementKind::Heading);
    let b = store.add(ElementKind::Text);
    let c = store.add(ElementKind::Button);
    assert!(store.move_to(&c, 0));
    assert!(store.move_to(&a, 99));
    let order: Vec<_> = store.iter().map(|e| e.id.clone()).collect();
    assert_eq!(order, vec![c, b, a]);
    assert!(!store.move_to(&ElementId::new(), 0));
}

#[test]
fn duplicate_inserts_after_original() {
    let mut store = ElementStore::new();
    let a = store.add(ElementKind::Heading);
    let b = store.add(ElementKind::Text);
    let copy = store.duplicate(&a).unwrap();
    let order: Vec<_> = store.iter().map(|e| e.id.clone()).collect();
    assert_eq!(order, vec![a.clone(), copy.clone(), b]);
    assert_eq!(store.get(&copy).unwrap().content, store.get(&a).unwrap().content);
}

// ── serialization ────────────────────────────────────────────────

#[test]
fn store_serializes_as_plain_array() {
    let mut store = ElementStore::new();
    let id = store.add(ElementKind::Text);
    store.select(Some(id));
    let value = serde_json::to_value(&store).unwrap();
    assert!(value.is_array());
    let back: ElementStore = serde_json::from_value(value).unwrap();
    assert_eq!(back, store);
    assert_eq!(back.selected(), None);
}

// ── properties ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn ids_stay_unique(kinds in prop::collection::vec(kind_strategy(), 0..40)) {
        let mut store = ElementStore::new();
        for kind in &kinds {
            store.add(*kind);
        }
        prop_assert_eq!(store.ids().len(), kinds.len());
        prop_assert_eq!(store.len(), kinds.len());
    }

    #[test]
    fn selection_always_points_at_live_element(
        kinds in prop::collection::vec(kind_strategy(), 1..20),
        ops in prop::collection::vec((0usize..20, any::<bool>()), 0..40),
    ) {
        let mut store = ElementStore::new();
        let ids: Vec<_> = kinds.iter().map(|k| store.add(*k)).collect();
        for (index, remove) in ops {
            let id = &ids[index % ids.len()];
            if remove {
                store.remove(id);
            } else {
                store.select(Some(id.clone()));
            }
            if let Some(selected) = store.selected() {
                prop_assert!(store.contains(selected));
            }
        }
    }
}

//! The element store: ordered elements of one page plus a single selection.
//!
//! Insertion order is render order. Containers nest elements, and every id
//! lookup searches the whole tree, so ids stay unique across all levels.
//! The selection is an id into the tree, never a reference to an element.

use crate::element::{ElementKind, ElementPatch, VisualElement};
use crate::error::ModelResult;
use funnelforge_types::ElementId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Owns the ordered element sequence of the page being edited.
///
/// Serializes as a plain array of elements; the selection and revision are
/// editing-session state and are not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<VisualElement>", into = "Vec<VisualElement>")]
pub struct ElementStore {
    elements: Vec<VisualElement>,
    selected: Option<ElementId>,
    revision: u64,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing elements. Duplicate ids are replaced
    /// with fresh ones.
    pub fn from_elements(elements: Vec<VisualElement>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(elements.len());
        for mut element in elements {
            ensure_unique(&mut element, &mut seen);
            unique.push(element);
        }
        Self {
            elements: unique,
            selected: None,
            revision: 0,
        }
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Appends a new element of `kind` with its default content and styles.
    pub fn add(&mut self, kind: ElementKind) -> ElementId {
        self.add_element(VisualElement::new(kind))
    }

    /// Appends a prepared element. Ids already present get replaced.
    pub fn add_element(&mut self, mut element: VisualElement) -> ElementId {
        let mut seen = self.ids();
        ensure_unique(&mut element, &mut seen);
        let id = element.id.clone();
        debug!(element = %id, kind = %element.kind(), "element added");
        self.elements.push(element);
        self.bump();
        id
    }

    /// Appends a new element of `kind` inside the container `parent`.
    ///
    /// Returns `None` if `parent` is absent or is not a container.
    pub fn add_child(&mut self, parent: &ElementId, kind: ElementKind) -> Option<ElementId> {
        let element = VisualElement::new(kind);
        let id = element.id.clone();
        let children = find_mut(&mut self.elements, parent)?.children_mut()?;
        children.push(element);
        self.bump();
        Some(id)
    }

    /// Merges `patch` into the element with `id`.
    ///
    /// Returns `Ok(false)` when no element has that id. A content patch that
    /// does not fit the element's kind is an error and changes nothing.
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> ModelResult<bool> {
        let Some(element) = find_mut(&mut self.elements, id) else {
            debug!(element = %id, "update ignored, element not found");
            return Ok(false);
        };
        let mut candidate = element.clone();
        candidate.apply(patch)?;
        *element = candidate;
        self.bump();
        Ok(true)
    }

    /// Deletes the element with `id` (and its children). Clears the
    /// selection if it pointed into the removed subtree.
    ///
    /// Returns `false` if nothing was removed.
    pub fn remove(&mut self, id: &ElementId) -> bool {
        let Some((list, index)) = locate_mut(&mut self.elements, id) else {
            return false;
        };
        let removed = list.remove(index);
        if let Some(selected) = &self.selected {
            let mut subtree = HashSet::new();
            collect_ids(std::slice::from_ref(&removed), &mut subtree);
            if subtree.contains(selected) {
                self.selected = None;
            }
        }
        debug!(element = %id, "element removed");
        self.bump();
        true
    }

    /// Sets or clears the selection. Selecting an absent id is ignored.
    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        match id {
            Some(ref id) if self.get(id).is_none() => false,
            _ => {
                if self.selected != id {
                    self.selected = id;
                    self.bump();
                }
                true
            }
        }
    }

    /// Moves the element with `id` to `index` within its own sibling list.
    /// Indices past the end move it last.
    pub fn move_to(&mut self, id: &ElementId, index: usize) -> bool {
        let Some((list, from)) = locate_mut(&mut self.elements, id) else {
            return false;
        };
        let element = list.remove(from);
        let to = index.min(list.len());
        list.insert(to, element);
        self.bump();
        true
    }

    /// Inserts a deep copy (with fresh ids) right after the original.
    pub fn duplicate(&mut self, id: &ElementId) -> Option<ElementId> {
        let (list, index) = locate_mut(&mut self.elements, id)?;
        let copy = list[index].duplicate();
        let copy_id = copy.id.clone();
        list.insert(index + 1, copy);
        self.bump();
        Some(copy_id)
    }

    // ── Queries ──────────────────────────────────────────────────

    pub fn get(&self, id: &ElementId) -> Option<&VisualElement> {
        find(&self.elements, id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn selected_element(&self) -> Option<&VisualElement> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Top-level elements in render order.
    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualElement> {
        self.elements.iter()
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Every id in the tree.
    pub fn ids(&self) -> HashSet<ElementId> {
        let mut ids = HashSet::new();
        collect_ids(&self.elements, &mut ids);
        ids
    }

    /// Increments on every successful mutation; observers compare it to
    /// decide whether to re-render or persist.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl PartialEq for ElementStore {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl From<Vec<VisualElement>> for ElementStore {
    fn from(elements: Vec<VisualElement>) -> Self {
        Self::from_elements(elements)
    }
}

impl From<ElementStore> for Vec<VisualElement> {
    fn from(store: ElementStore) -> Self {
        store.elements
    }
}

fn ensure_unique(element: &mut VisualElement, seen: &mut HashSet<ElementId>) {
    if !seen.insert(element.id.clone()) {
        element.id = ElementId::new();
        seen.insert(element.id.clone());
    }
    if let Some(children) = element.children_mut() {
        for child in children {
            ensure_unique(child, seen);
        }
    }
}

fn collect_ids(list: &[VisualElement], ids: &mut HashSet<ElementId>) {
    for element in list {
        ids.insert(element.id.clone());
        if let Some(children) = element.children() {
            collect_ids(children, ids);
        }
    }
}

fn find<'a>(list: &'a [VisualElement], id: &ElementId) -> Option<&'a VisualElement> {
    for element in list {
        if &element.id == id {
            return Some(element);
        }
        if let Some(found) = element.children().and_then(|c| find(c, id)) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(
    list: &'a mut [VisualElement],
    id: &ElementId,
) -> Option<&'a mut VisualElement> {
    for element in list.iter_mut() {
        if &element.id == id {
            return Some(element);
        }
        if let Some(children) = element.children_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Finds the sibling list holding `id` and its index in that list.
fn locate_mut<'a>(
    list: &'a mut Vec<VisualElement>,
    id: &ElementId,
) -> Option<(&'a mut Vec<VisualElement>, usize)> {
    if let Some(index) = list.iter().position(|e| &e.id == id) {
        return Some((list, index));
    }
    for element in list.iter_mut() {
        if let Some(children) = element.children_mut() {
            if let Some(found) = locate_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

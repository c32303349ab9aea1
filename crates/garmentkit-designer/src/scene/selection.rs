use garmentkit_core::ObjectId;

use super::store::ObjectStore;

/// Tracks the single selected object.
///
/// The mockup surface only supports one active selection at a time, so
/// there is no multi-select state here.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionManager {
    selected_id: Option<ObjectId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    pub fn selected_id(&self) -> Option<ObjectId> {
        self.selected_id
    }

    /// Selects `id` if the store holds it, otherwise clears the selection.
    /// Returns whether the selection changed.
    pub fn select(&mut self, store: &ObjectStore, id: Option<ObjectId>) -> bool {
        let next = id.filter(|&id| store.contains(id));
        let changed = next != self.selected_id;
        self.selected_id = next;
        changed
    }

    /// Clears the selection if it points at `id`.
    pub fn forget(&mut self, id: ObjectId) -> bool {
        if self.selected_id == Some(id) {
            self.selected_id = None;
            true
        } else {
            false
        }
    }
}

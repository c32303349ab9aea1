//! Scene state: the placed objects and the current selection.

mod selection;
mod store;

pub use selection::SelectionManager;
pub use store::ObjectStore;

use garmentkit_core::{Bounds, ObjectId};

use crate::area::GarmentView;
use crate::model::SceneObject;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub store: ObjectStore,
    pub selection: SelectionManager,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    pub fn generate_id(&mut self) -> ObjectId {
        self.store.generate_id()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.store.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.store.get_mut(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.store.iter()
    }

    pub fn objects_in_view(&self, view: GarmentView) -> impl Iterator<Item = &SceneObject> {
        self.store.in_view(view)
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.store.insert(object);
        id
    }

    /// Removes an object, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.store.remove(id)?;
        self.selection.forget(id);
        Some(removed)
    }

    pub fn selected_id(&self) -> Option<ObjectId> {
        self.selection.selected_id()
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    pub fn select(&mut self, id: Option<ObjectId>) -> bool {
        self.selection.select(&self.store, id)
    }

    /// Bounding box of the selected object.
    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.selected().map(SceneObject::bounds)
    }
}

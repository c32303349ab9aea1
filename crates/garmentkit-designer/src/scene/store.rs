use garmentkit_core::ObjectId;
use std::collections::HashMap;

use crate::area::GarmentView;
use crate::model::SceneObject;

/// Owns scene objects and their draw order.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects: HashMap<ObjectId, SceneObject>,
    draw_order: Vec<ObjectId>,
    next_id: ObjectId,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            draw_order: Vec::new(),
            next_id: 1,
        }
    }

    pub fn generate_id(&mut self) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Inserts `object`, placing it on top. Re-inserting an id keeps its
    /// draw position.
    pub fn insert(&mut self, object: SceneObject) {
        let id = object.id;
        if id >= self.next_id {
            self.next_id = id + 1;
        }
        if self.objects.insert(id, object).is_none() {
            self.draw_order.push(id);
        }
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(&id)?;
        self.draw_order.retain(|&other| other != id);
        Some(removed)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.draw_order.iter().filter_map(|id| self.objects.get(id))
    }

    pub fn in_view(&self, view: GarmentView) -> impl Iterator<Item = &SceneObject> {
        self.iter().filter(move |o| o.view == view)
    }

    pub fn ids_in_view(&self, view: GarmentView) -> Vec<ObjectId> {
        self.in_view(view).map(|o| o.id).collect()
    }
}

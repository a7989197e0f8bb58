//! The scene store: objects, collections, and the mutation surface the
//! culling engine is allowed to touch.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::error::SceneError;
use crate::object::{Object, ObjectId};

/// Stable identifier for a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(pub u32);

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "coll#{}", self.0)
    }
}

/// A named group of objects that can be instanced by an object elsewhere
/// in the scene.
#[derive(Clone, Debug)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    /// Origin offset applied when the collection is instanced.
    pub instance_offset: Vec3,
    /// Full object membership, including objects of nested collections.
    pub members: Vec<ObjectId>,
}

/// In-memory scene: the queryable object store the engine culls against.
#[derive(Debug, Default)]
pub struct Scene {
    objects: FxHashMap<ObjectId, Object>,
    collections: FxHashMap<CollectionId, Collection>,
    root: Vec<ObjectId>,
    next_collection: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene root.
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let id = object.id;
        self.root.push(id);
        self.objects.insert(id, object);
        id
    }

    /// Create a collection with the given membership. Member objects must
    /// already have been added via [`Scene::add_object`].
    pub fn add_collection(
        &mut self,
        name: impl Into<String>,
        instance_offset: Vec3,
        members: Vec<ObjectId>,
    ) -> CollectionId {
        let id = CollectionId(self.next_collection);
        self.next_collection += 1;
        self.collections.insert(
            id,
            Collection {
                id,
                name: name.into(),
                instance_offset,
                members,
            },
        );
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id)
    }

    pub fn collection(&self, id: CollectionId) -> Option<&Collection> {
        self.collections.get(&id)
    }

    /// Iterate over every object in the scene.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Every object reachable from the scene root, i.e. the full object
    /// membership an instance-resolver pass scans.
    pub fn root_objects(&self) -> impl Iterator<Item = &Object> {
        self.root.iter().filter_map(|id| self.objects.get(id))
    }

    /// Remove an object entirely (host-side deletion). Collections keep
    /// their member lists; lookups for the removed id start failing, which
    /// is exactly the mid-frame deletion case the engine must tolerate.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Object> {
        self.root.retain(|o| *o != id);
        self.objects.remove(&id)
    }

    /// Current hidden flag of an object.
    pub fn is_hidden(&self, id: ObjectId) -> Result<bool, SceneError> {
        self.objects
            .get(&id)
            .map(|o| o.hidden)
            .ok_or(SceneError::ObjectMissing(id))
    }

    /// Set an object's hidden flag. Fails if the object has been removed.
    pub fn set_hidden(&mut self, id: ObjectId, hidden: bool) -> Result<(), SceneError> {
        let obj = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::ObjectMissing(id))?;
        obj.hidden = hidden;
        Ok(())
    }

    /// Triangle count of the object's evaluated mesh.
    ///
    /// Fails when the object is gone or its evaluation is unavailable;
    /// callers are expected to treat the failure as a zero-cost object
    /// rather than abort the batch.
    pub fn evaluated_triangle_count(&self, id: ObjectId) -> Result<u32, SceneError> {
        let obj = self.objects.get(&id).ok_or(SceneError::ObjectMissing(id))?;
        obj.mesh
            .as_ref()
            .and_then(|m| m.evaluated_triangles)
            .ok_or_else(|| SceneError::EvaluationFailed {
                name: obj.name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{MeshStats, ObjectKind};

    #[test]
    fn test_hidden_flag_round_trip() {
        let mut scene = Scene::new();
        let id = scene.add_object(Object::mesh(ObjectId(1), "cube", MeshStats::default()));
        assert!(!scene.is_hidden(id).unwrap());
        scene.set_hidden(id, true).unwrap();
        assert!(scene.is_hidden(id).unwrap());
    }

    #[test]
    fn test_set_hidden_on_removed_object_fails() {
        let mut scene = Scene::new();
        let id = scene.add_object(Object::point(ObjectId(2), "lamp", ObjectKind::Light));
        scene.remove_object(id);
        assert!(matches!(
            scene.set_hidden(id, true),
            Err(SceneError::ObjectMissing(_))
        ));
    }

    #[test]
    fn test_triangle_count_requires_evaluation() {
        let mut scene = Scene::new();
        let ok = scene.add_object(Object::mesh(
            ObjectId(1),
            "good",
            MeshStats {
                vertex_count: 8,
                evaluated_triangles: Some(12),
            },
        ));
        let bad = scene.add_object(Object::mesh(
            ObjectId(2),
            "poisoned",
            MeshStats {
                vertex_count: 8,
                evaluated_triangles: None,
            },
        ));

        assert_eq!(scene.evaluated_triangle_count(ok).unwrap(), 12);
        assert!(matches!(
            scene.evaluated_triangle_count(bad),
            Err(SceneError::EvaluationFailed { .. })
        ));
    }

    #[test]
    fn test_collections_keep_members_after_object_removal() {
        let mut scene = Scene::new();
        let a = scene.add_object(Object::mesh(ObjectId(1), "a", MeshStats::default()));
        let b = scene.add_object(Object::mesh(ObjectId(2), "b", MeshStats::default()));
        let coll = scene.add_collection("props", Vec3::ZERO, vec![a, b]);

        scene.remove_object(a);
        let members = &scene.collection(coll).unwrap().members;
        assert_eq!(members.len(), 2);
        assert!(scene.object(a).is_none());
    }
}

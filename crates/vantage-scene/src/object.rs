//! Scene objects and their per-object attributes.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use vantage_math::CornerBox;

use crate::scene::CollectionId;

/// Stable identifier for a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Object type tag, matching the host scene's object taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Mesh,
    Curve,
    Light,
    Camera,
    Empty,
    Armature,
    Speaker,
}

/// Geometry statistics carried by mesh objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshStats {
    /// Vertex count of the base mesh.
    pub vertex_count: u32,
    /// Triangle count of the evaluated (post-modifier) mesh, when the host
    /// has a usable evaluation for it. `None` means evaluation failed or is
    /// unavailable; budgeting treats such meshes as free rather than
    /// aborting the frame.
    pub evaluated_triangles: Option<u32>,
}

/// A scene object as seen by the culling engine.
///
/// Owned and mutated by the host scene; the engine only reads attributes
/// and toggles the hidden flag through [`crate::Scene::set_hidden`].
#[derive(Clone, Debug)]
pub struct Object {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    /// Native bounding corners in the object's local space, canonical
    /// ordering. Degenerate (single-point) for lights, cameras, and
    /// non-instancing empties.
    pub bound_corners: CornerBox,
    /// Local-to-world transform.
    pub world_transform: Mat4,
    /// Mesh statistics; `None` for non-mesh objects.
    pub mesh: Option<MeshStats>,
    /// Collection this object instances, if it is a collection instancer.
    pub instances: Option<CollectionId>,
    /// Whether the object is currently hidden in the viewport. The engine
    /// reads this before emitting transitions so redundant toggles are
    /// never issued.
    pub hidden: bool,
    /// Host-level viewport disable flag; disabled objects are never
    /// candidates for evaluation.
    pub viewport_disabled: bool,
}

impl Object {
    /// Create a mesh object with a unit-cube native box.
    pub fn mesh(id: ObjectId, name: impl Into<String>, stats: MeshStats) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ObjectKind::Mesh,
            bound_corners: CornerBox::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0)),
            world_transform: Mat4::IDENTITY,
            mesh: Some(stats),
            instances: None,
            hidden: false,
            viewport_disabled: false,
        }
    }

    /// Create a non-mesh object of the given kind with a degenerate box.
    pub fn point(id: ObjectId, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            bound_corners: CornerBox::new([Vec3::ZERO; 8]),
            world_transform: Mat4::IDENTITY,
            mesh: None,
            instances: None,
            hidden: false,
            viewport_disabled: false,
        }
    }

    /// Create an empty that instances `collection`.
    pub fn instancer(id: ObjectId, name: impl Into<String>, collection: CollectionId) -> Self {
        let mut obj = Self::point(id, name, ObjectKind::Empty);
        obj.instances = Some(collection);
        obj
    }

    /// Place the object at `position`, keeping orientation and scale.
    pub fn at(mut self, position: Vec3) -> Self {
        self.world_transform = Mat4::from_translation(position);
        self
    }

    /// Replace the object's native bounding corners.
    pub fn with_bounds(mut self, bounds: CornerBox) -> Self {
        self.bound_corners = bounds;
        self
    }

    /// True if this object instances a collection.
    pub fn is_instancer(&self) -> bool {
        self.instances.is_some()
    }

    /// World-space origin of the object.
    pub fn origin(&self) -> Vec3 {
        self.world_transform.w_axis.truncate()
    }
}

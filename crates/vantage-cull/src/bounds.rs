//! Session-scoped bounding-volume cache.
//!
//! Produces a usable 8-corner bounding box for every object, recursively
//! coalescing collection-instance members into a single envelope. Box
//! *shapes* are memoized per object and per collection for the session
//! lifetime; the object's world matrix is applied on every lookup and never
//! cached, since distinct instances share geometry but not placement.

use glam::Vec3;
use rustc_hash::FxHashMap;

use vantage_math::CornerBox;
use vantage_scene::{CollectionId, ObjectId, Scene};

use crate::error::CullError;

/// Memoizing calculator for object bounding boxes.
pub struct BoundsCache {
    min_box_size: f32,
    /// Local-space box shape per object.
    objects: FxHashMap<ObjectId, CornerBox>,
    /// Coalesced member envelope per instanced collection, in the
    /// collection's own space (pre-world-transform).
    collections: FxHashMap<CollectionId, CornerBox>,
}

impl BoundsCache {
    /// Create an empty cache. `min_box_size` is the half-extent of the
    /// synthetic cube substituted for degenerate native boxes.
    pub fn new(min_box_size: f32) -> Self {
        Self {
            min_box_size,
            objects: FxHashMap::default(),
            collections: FxHashMap::default(),
        }
    }

    /// The object's box in world space: memoized local shape, current
    /// world matrix applied fresh.
    pub fn world_box(&mut self, scene: &Scene, id: ObjectId) -> Result<CornerBox, CullError> {
        let local = self.local_box(scene, id)?;
        let obj = scene.object(id).ok_or(CullError::ObjectVanished(id))?;
        Ok(local.transformed(&obj.world_transform))
    }

    /// The object's box shape in local space, computed at most once per
    /// object per session.
    pub fn local_box(&mut self, scene: &Scene, id: ObjectId) -> Result<CornerBox, CullError> {
        let mut visited = Vec::new();
        self.local_box_guarded(scene, id, &mut visited)
    }

    fn local_box_guarded(
        &mut self,
        scene: &Scene,
        id: ObjectId,
        visited: &mut Vec<CollectionId>,
    ) -> Result<CornerBox, CullError> {
        if let Some(cached) = self.objects.get(&id) {
            return Ok(*cached);
        }
        let obj = scene.object(id).ok_or(CullError::ObjectVanished(id))?;

        let shape = if let Some(coll_id) = obj.instances {
            self.coalesced_box(scene, coll_id, obj.bound_corners, visited)?
        } else if obj.bound_corners.is_degenerate() {
            // Lights, cameras, plain empties: no determinable size, so give
            // them a minimum-size cube the filter can still reason about.
            CornerBox::synthetic(self.min_box_size)
        } else {
            obj.bound_corners
        };

        self.objects.insert(id, shape);
        Ok(shape)
    }

    /// Envelope over a collection's members, offset by the negated instance
    /// offset and unioned with the instancer's own raw box. Cached per
    /// collection: every instancer of the same collection shares the shape
    /// and applies only its own world matrix.
    fn coalesced_box(
        &mut self,
        scene: &Scene,
        coll_id: CollectionId,
        instancer_raw: CornerBox,
        visited: &mut Vec<CollectionId>,
    ) -> Result<CornerBox, CullError> {
        if let Some(cached) = self.collections.get(&coll_id) {
            return Ok(*cached);
        }
        let Some(coll) = scene.collection(coll_id) else {
            log::warn!("instanced collection {coll_id} missing, using instancer's own box");
            return Ok(instancer_raw);
        };
        if visited.contains(&coll_id) {
            return Err(CullError::CycleDetected {
                collection: coll.name.clone(),
            });
        }
        visited.push(coll_id);

        let offset = -coll.instance_offset;
        let mut points: Vec<Vec3> = Vec::with_capacity((coll.members.len() + 1) * 8);
        for &member_id in &coll.members {
            let Some(member) = scene.object(member_id) else {
                log::warn!("collection member {member_id} missing, skipping");
                continue;
            };
            let member_local = self.local_box_guarded(scene, member_id, visited)?;
            let member_box = member_local
                .transformed(&member.world_transform)
                .translated(offset);
            points.extend(member_box.corners);
        }
        points.extend(instancer_raw.corners);

        // `points` always holds at least the instancer's 8 corners.
        let coalesced = CornerBox::envelope(points).unwrap_or(instancer_raw);

        visited.pop();
        self.collections.insert(coll_id, coalesced);
        Ok(coalesced)
    }
}

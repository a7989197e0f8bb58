//! Collection/instance resolution: which objects exist only through
//! instances.
//!
//! An object that is a member of an instanced collection is rendered once
//! per instancer; toggling its own hidden flag would blank it out of every
//! instance at once. The session uses this set to exclude such objects
//! from individual evaluation.

use rustc_hash::FxHashSet;

use vantage_scene::{CollectionId, ObjectId, Scene};

/// All objects that are direct members of any collection instanced by an
/// object in the scene. Each member is yielded once even when several
/// instancers reference overlapping collections.
pub fn instanced_members(scene: &Scene) -> FxHashSet<ObjectId> {
    let instanced: FxHashSet<CollectionId> = scene
        .root_objects()
        .filter_map(|obj| obj.instances)
        .collect();

    let mut members = FxHashSet::default();
    for coll_id in instanced {
        let Some(coll) = scene.collection(coll_id) else {
            continue;
        };
        members.extend(coll.members.iter().copied());
    }
    members
}

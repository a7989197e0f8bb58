//! In-memory scene model consumed by the culling engine.
//!
//! Mirrors the host application's scene surface: objects with type tags,
//! native bounding corners, world transforms, mesh statistics, and
//! collection-instancing relationships, plus the camera/view context used
//! to project world points onto the viewport. The culling engine reads
//! object attributes and toggles hidden flags; it never creates or destroys
//! scene data.

mod error;
mod object;
mod scene;
mod view;

pub use error::SceneError;
pub use object::{MeshStats, Object, ObjectId, ObjectKind};
pub use scene::{Collection, CollectionId, Scene};
pub use view::{ViewContext, Viewport};

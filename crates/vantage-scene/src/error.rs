//! Scene access error types.

use crate::object::ObjectId;
use crate::scene::CollectionId;

/// Errors reported by scene queries and mutations.
///
/// These are per-object conditions (an object deleted mid-frame, a mesh
/// whose evaluated geometry is unavailable); callers in the culling engine
/// log them and continue the batch rather than aborting a frame.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The object no longer exists in the scene.
    #[error("object {0} not found")]
    ObjectMissing(ObjectId),

    /// The referenced collection no longer exists.
    #[error("collection {0} not found")]
    CollectionMissing(CollectionId),

    /// The object's evaluated mesh could not be produced.
    #[error("mesh evaluation failed for {name}")]
    EvaluationFailed { name: String },
}

//! Culling engine error types.

use vantage_config::ConfigError;
use vantage_scene::ObjectId;

/// Errors raised by session setup and bounding-volume computation.
///
/// Per-object transient failures (a deleted object, a failed mesh
/// evaluation) are deliberately *not* represented here; they are logged at
/// the point of failure and the batch continues.
#[derive(Debug, thiserror::Error)]
pub enum CullError {
    /// The collection-instancing graph contains a cycle. Bounding-box
    /// computation for the offending object is aborted instead of recursing
    /// forever.
    #[error("instancing cycle detected through collection '{collection}'")]
    CycleDetected { collection: String },

    /// An object disappeared between candidate resolution and evaluation.
    #[error("object {0} vanished during evaluation")]
    ObjectVanished(ObjectId),

    /// The session was started with an unusable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

//! Per-frame visibility culling and resource budgeting.
//!
//! For every refresh of a camera view, this crate decides which scene
//! objects should be drawn and which suppressed, subject to distance and
//! screen-projection visibility plus a configurable rendering-cost budget
//! (object, vertex, or triangle count). The per-frame pipeline:
//!
//! 1. resolve candidates (enabled kinds, minus instanced-collection members),
//! 2. look up each candidate's 8-corner world bounds through the session's
//!    bounding-volume cache,
//! 3. filter by camera distance and projected viewport extent,
//! 4. rank survivors by cost and distance,
//! 5. greedily admit a prefix that fits the budget,
//! 6. emit the minimal show/hide transitions against current scene state.
//!
//! All caches live on the [`CullSession`] and die with it; nothing is
//! shared or global, so fresh sessions and tests always start clean.

mod allocator;
mod bounds;
mod budget;
mod driver;
mod error;
mod reconcile;
mod resolver;
mod session;
mod stats;
mod visibility;

pub use allocator::{CandidateEntry, allocate, rank};
pub use bounds::BoundsCache;
pub use budget::Budgeter;
pub use driver::{DriverState, RefreshDriver};
pub use error::CullError;
pub use reconcile::{Transition, VisibilityAction, apply_transitions, reconcile};
pub use resolver::instanced_members;
pub use session::{CullSession, FrameResult};
pub use stats::{FrameStats, format_num};
pub use visibility::{is_candidate_visible, projects_on_screen, within_range};

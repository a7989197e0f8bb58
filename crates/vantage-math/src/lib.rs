//! Geometry primitives for viewport culling: 8-corner bounding boxes,
//! min/max envelopes, and corner-to-point distance queries.

mod corner_box;

pub use corner_box::{CORNER_TEMPLATE, CornerBox};

//! Distance and screen-projection visibility tests.
//!
//! Visibility here is a cheap heuristic, not occlusion: an object counts as
//! visible when at least one bounding-box corner is within range of the
//! camera and its projected corner cloud overlaps the viewport rectangle.

use glam::Vec3;

use vantage_math::CornerBox;
use vantage_scene::ViewContext;

/// True if any box corner lies within `max_distance` of the camera.
pub fn within_range(camera_pos: Vec3, bounds: &CornerBox, max_distance: f32) -> bool {
    bounds.within_distance(camera_pos, max_distance)
}

/// True if the box's projected extent overlaps the viewport.
///
/// Corners that fail to project (behind the camera) are dropped. With no
/// projecting corner the object is invisible. Otherwise the object is
/// culled only when every projected X or every projected Y falls off the
/// same side of the viewport: a separating-side test on the projected
/// extent, not a polygon clip.
pub fn projects_on_screen(view: &ViewContext, bounds: &CornerBox) -> bool {
    let mut xs = [0.0f32; 8];
    let mut ys = [0.0f32; 8];
    let mut count = 0;
    for corner in bounds.corners {
        if let Some(p) = view.project(corner) {
            xs[count] = p.x;
            ys[count] = p.y;
            count += 1;
        }
    }
    if count == 0 {
        return false;
    }
    let xs = &xs[..count];
    let ys = &ys[..count];

    if xs.iter().all(|&x| x < 0.0) || ys.iter().all(|&y| y < 0.0) {
        return false;
    }
    if xs.iter().all(|&x| x > view.viewport.width) || ys.iter().all(|&y| y > view.viewport.height) {
        return false;
    }
    true
}

/// Combined candidate test: the cheap distance check gates the projection
/// check.
pub fn is_candidate_visible(view: &ViewContext, bounds: &CornerBox, max_distance: f32) -> bool {
    within_range(view.position, bounds, max_distance) && projects_on_screen(view, bounds)
}

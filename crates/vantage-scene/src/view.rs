//! Camera/view context: world-to-viewport projection.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Viewport dimensions in pixels.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// The camera state a frame is evaluated against: world position, combined
/// view-projection transform, and the viewport it maps onto.
#[derive(Clone, Debug)]
pub struct ViewContext {
    /// Camera world-space position.
    pub position: Vec3,
    /// Combined view and projection matrix.
    pub view_proj: Mat4,
    pub viewport: Viewport,
}

impl ViewContext {
    /// Build a perspective view context looking from `position` at `target`.
    pub fn perspective(
        position: Vec3,
        target: Vec3,
        fov_y: f32,
        viewport: Viewport,
        near: f32,
        far: f32,
    ) -> Self {
        let aspect = viewport.width / viewport.height;
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        let proj = Mat4::perspective_rh(fov_y, aspect, near, far);
        Self {
            position,
            view_proj: proj * view,
            viewport,
        }
    }

    /// Project a world-space point to viewport pixel coordinates.
    ///
    /// Returns `None` when the point is behind the camera (or otherwise has
    /// no defined projection). Points in front of the camera always project,
    /// even when the result lies outside the viewport rectangle; the
    /// visibility filter needs off-screen coordinates to reason about a
    /// box's projected extent.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.width,
            (ndc.y + 1.0) * 0.5 * self.viewport.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_view() -> ViewContext {
        ViewContext::perspective(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            std::f32::consts::FRAC_PI_2,
            Viewport {
                width: 1000.0,
                height: 500.0,
            },
            0.1,
            1000.0,
        )
    }

    #[test]
    fn test_point_ahead_projects_to_viewport_center() {
        let view = test_view();
        let p = view.project(Vec3::new(0.0, 0.0, -10.0)).unwrap();
        assert!((p.x - 500.0).abs() < 0.5);
        assert!((p.y - 250.0).abs() < 0.5);
    }

    #[test]
    fn test_point_behind_camera_does_not_project() {
        let view = test_view();
        assert!(view.project(Vec3::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_offscreen_point_still_projects() {
        let view = test_view();
        // Far off to the left but in front of the camera.
        let p = view.project(Vec3::new(-100.0, 0.0, -10.0)).unwrap();
        assert!(p.x < 0.0);
    }
}

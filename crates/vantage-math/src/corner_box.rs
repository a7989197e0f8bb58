use glam::{Mat4, Vec3};

/// Unit-cube corners in the canonical ordering shared by every box producer.
///
/// Index layout: corners 0..4 sit on the min-X face, 4..8 on the max-X face,
/// each face wound (-y,-z), (-y,+z), (+y,+z), (+y,-z). Coalescing code
/// indexes corners by this layout, so all producers must emit it.
pub const CORNER_TEMPLATE: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
];

/// An 8-corner bounding box.
///
/// In local space the corners describe an axis-aligned box; after a world
/// transform they describe an oriented hexahedron. The corner ordering
/// follows [`CORNER_TEMPLATE`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerBox {
    pub corners: [Vec3; 8],
}

impl CornerBox {
    /// Create a box from explicit corners. The caller is responsible for
    /// supplying them in the canonical ordering.
    pub fn new(corners: [Vec3; 8]) -> Self {
        Self { corners }
    }

    /// Build the canonical 8 corners of the axis-aligned box spanning
    /// `min`..`max`.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            corners: [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(min.x, max.y, min.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(max.x, max.y, min.z),
            ],
        }
    }

    /// The axis-aligned envelope of a point cloud, as a canonical box.
    /// Returns `None` for an empty iterator.
    pub fn envelope(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::from_min_max(min, max))
    }

    /// A synthetic cube of half-extent `size` centered on the origin, used
    /// as a stand-in for objects whose native box collapses to a point.
    pub fn synthetic(size: f32) -> Self {
        Self {
            corners: CORNER_TEMPLATE.map(|c| c * size),
        }
    }

    /// True when all 8 corners collapse to a single point (zero volume).
    /// Lights, cameras, and non-instancing empties report boxes like this.
    pub fn is_degenerate(&self) -> bool {
        self.corners.iter().all(|c| *c == self.corners[0])
    }

    /// Transform every corner into another space.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            corners: self.corners.map(|c| matrix.transform_point3(c)),
        }
    }

    /// Translate every corner by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            corners: self.corners.map(|c| c + offset),
        }
    }

    /// Component-wise minimum over all corners.
    pub fn min(&self) -> Vec3 {
        self.corners.iter().copied().fold(self.corners[0], Vec3::min)
    }

    /// Component-wise maximum over all corners.
    pub fn max(&self) -> Vec3 {
        self.corners.iter().copied().fold(self.corners[0], Vec3::max)
    }

    /// Distance from `point` to the closest corner.
    ///
    /// Corner distance, not center distance: a large object whose center is
    /// far away but whose near corner is close still counts as close.
    pub fn min_distance(&self, point: Vec3) -> f32 {
        self.corners
            .iter()
            .map(|c| c.distance(point))
            .fold(f32::INFINITY, f32::min)
    }

    /// True if any corner lies within `max_distance` of `point`.
    pub fn within_distance(&self, point: Vec3, max_distance: f32) -> bool {
        self.corners
            .iter()
            .any(|c| c.distance(point) < max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_min_max_matches_template_ordering() {
        let unit = CornerBox::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(unit.corners, CORNER_TEMPLATE);
    }

    #[test]
    fn test_envelope_spans_all_points() {
        let points = [
            Vec3::new(1.0, 5.0, -2.0),
            Vec3::new(-3.0, 0.0, 4.0),
            Vec3::new(2.0, -1.0, 0.0),
        ];
        let env = CornerBox::envelope(points).unwrap();
        assert_eq!(env.min(), Vec3::new(-3.0, -1.0, -2.0));
        assert_eq!(env.max(), Vec3::new(2.0, 5.0, 4.0));
    }

    #[test]
    fn test_envelope_empty_is_none() {
        assert!(CornerBox::envelope(std::iter::empty()).is_none());
    }

    #[test]
    fn test_degenerate_detection() {
        let point = CornerBox::new([Vec3::new(2.0, 3.0, 4.0); 8]);
        assert!(point.is_degenerate());

        let cube = CornerBox::from_min_max(Vec3::ZERO, Vec3::ONE);
        assert!(!cube.is_degenerate());
    }

    #[test]
    fn test_synthetic_has_volume() {
        let synth = CornerBox::synthetic(0.1);
        assert!(!synth.is_degenerate());
        let size = synth.max() - synth.min();
        assert!((size.x - 0.2).abs() < 1e-6);
        assert!((size.y - 0.2).abs() < 1e-6);
        assert!((size.z - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_transformed_applies_translation() {
        let cube = CornerBox::from_min_max(Vec3::ZERO, Vec3::ONE);
        let moved = cube.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(moved.min(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(moved.max(), Vec3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn test_transformed_preserves_corner_count_under_rotation() {
        let cube = CornerBox::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
        let rotated = cube.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4));
        // A rotated box is no longer axis-aligned, but the corner cloud's
        // envelope must still contain the original extents.
        let env = CornerBox::envelope(rotated.corners).unwrap();
        assert!(env.max().x > 1.0);
    }

    #[test]
    fn test_min_distance_uses_closest_corner() {
        // Box spanning x in [10, 20]: center is at x=15 but the near corner
        // is at x=10, so distance from the origin is 10 (plus y/z 0).
        let b = CornerBox::from_min_max(Vec3::new(10.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0));
        assert!((b.min_distance(Vec3::ZERO) - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_within_distance_boundary() {
        let b = CornerBox::from_min_max(Vec3::new(5.0, 0.0, 0.0), Vec3::new(6.0, 1.0, 1.0));
        assert!(b.within_distance(Vec3::ZERO, 5.1));
        // Strictly-less comparison: exactly at the distance does not count.
        assert!(!b.within_distance(Vec3::ZERO, 5.0));
    }

    #[test]
    fn test_translated_shifts_all_corners() {
        let b = CornerBox::from_min_max(Vec3::ZERO, Vec3::ONE);
        let shifted = b.translated(Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(shifted.min(), Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(shifted.max(), Vec3::new(1.0, -1.0, 1.0));
    }
}

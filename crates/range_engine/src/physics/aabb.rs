//! Axis-aligned bounding boxes

use crate::foundation::math::{Mat4, Point3};

/// An axis-aligned bounding box described by its min/max corners
///
/// Invariant: `min <= max` componentwise. Construction from point sets and
/// transformation both preserve it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Smallest corner
    pub min: Point3,
    /// Largest corner
    pub max: Point3,
}

impl Aabb {
    /// Create a box from raw corners
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Tightest box around a set of points; `None` when the set is empty
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// The eight corner points of the box
    pub fn corners(&self) -> [Point3; 8] {
        let (mn, mx) = (self.min, self.max);
        [
            Point3::new(mn.x, mn.y, mn.z),
            Point3::new(mx.x, mn.y, mn.z),
            Point3::new(mn.x, mx.y, mn.z),
            Point3::new(mx.x, mx.y, mn.z),
            Point3::new(mn.x, mn.y, mx.z),
            Point3::new(mx.x, mn.y, mx.z),
            Point3::new(mn.x, mx.y, mx.z),
            Point3::new(mx.x, mx.y, mx.z),
        ]
    }

    /// Axis-aligned box around this box transformed by `matrix`
    ///
    /// Transforms all eight corners and rebounds them, so the result stays
    /// axis-aligned (and conservative) under rotation.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let corners = self.corners();
        let mut min = matrix.transform_point(&corners[0]);
        let mut max = min;

        for c in &corners[1..] {
            let p = matrix.transform_point(c);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Self { min, max }
    }

    /// Center point of the box
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Standard AABB overlap test: true iff all three axis intervals overlap
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

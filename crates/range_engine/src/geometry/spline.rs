//! Catmull-Rom spline interpolation through 3D control points
//!
//! Uniform Catmull-Rom: the curve passes exactly through every control point,
//! with endpoint tangents taken from clamped neighbors. Duplicating the final
//! control point is the callers' idiom for anchoring the exit tangent.

use super::GeometryError;
use crate::foundation::math::{Point3, Vec3};

/// Interpolating cubic spline over an ordered set of 3D control points
#[derive(Debug, Clone)]
pub struct CatmullRom3 {
    points: Vec<Point3>,
}

impl CatmullRom3 {
    /// Build a spline through `points`, in order
    pub fn new(points: Vec<Point3>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewControlPoints(points.len()));
        }

        Ok(Self { points })
    }

    /// The control points the curve passes through
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    /// Evaluate the curve at parameter `t`, clamped into `[0, 1]`
    ///
    /// `t = 0` is the first control point, `t = 1` the last; each of the
    /// `len - 1` spans covers an equal parameter interval.
    pub fn point_at(&self, t: f32) -> Point3 {
        let n = self.points.len();
        let spans = (n - 1) as f32;

        let scaled = t.clamp(0.0, 1.0) * spans;
        // last span owns t = 1.0
        let span = (scaled.floor() as usize).min(n - 2);
        let u = scaled - span as f32;

        let p0 = self.points[span.saturating_sub(1)];
        let p1 = self.points[span];
        let p2 = self.points[span + 1];
        let p3 = self.points[(span + 2).min(n - 1)];

        catmull_rom(p0, p1, p2, p3, u)
    }

    /// Sample `segments` points at `t = i / segments` for `i in 0..segments`
    ///
    /// Matches the half-open sweep trajectory lines use: the final sample
    /// approaches but does not land exactly on the last control point (the
    /// duplicated endpoint keeps it numerically adjacent).
    pub fn sample(&self, segments: usize) -> Vec<Point3> {
        (0..segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}

/// Cubic Catmull-Rom basis over one span, `u` in `[0, 1]`
fn catmull_rom(p0: Point3, p1: Point3, p2: Point3, p3: Point3, u: f32) -> Point3 {
    let v0: Vec3 = p0.coords;
    let v1: Vec3 = p1.coords;
    let v2: Vec3 = p2.coords;
    let v3: Vec3 = p3.coords;

    let u2 = u * u;
    let u3 = u2 * u;

    let result = (v1 * 2.0
        + (v2 - v0) * u
        + (v0 * 2.0 - v1 * 5.0 + v2 * 4.0 - v3) * u2
        + (v1 * 3.0 - v0 - v2 * 3.0 + v3) * u3)
        * 0.5;

    Point3::from(result)
}

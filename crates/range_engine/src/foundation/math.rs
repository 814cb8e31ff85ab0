//! Math utilities and types
//!
//! Provides the fundamental math types used across the engine. All coordinates
//! are Y-up right-handed; the ground plane is XZ.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }

    /// Combine this transform with a child transform
    ///
    /// The result places the child in the parent's frame, so chaining
    /// `combine` down a link hierarchy yields each link's world transform.
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Point3, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Componentwise linear interpolation between two points
    pub fn lerp_point(a: Point3, b: Point3, t: f32) -> Point3 {
        Point3::new(
            lerp(a.x, b.x, t),
            lerp(a.y, b.y, t),
            lerp(a.z, b.z, t),
        )
    }

    /// Unsigned angle in radians between two vectors, in `[0, PI]`
    ///
    /// Both vectors must be non-zero; the cosine is clamped before `acos` to
    /// absorb floating-point drift.
    pub fn angle_between(a: &Vec3, b: &Vec3) -> f32 {
        let denom = a.magnitude() * b.magnitude();
        let cos = clamp(a.dot(b) / denom, -1.0, 1.0);
        cos.acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_transform_identity_matrix() {
        let transform = Transform::identity();
        let point = Point3::new(1.0, -2.0, 3.0);

        assert_relative_eq!(transform.transform_point(point), point, epsilon = EPSILON);
    }

    #[test]
    fn test_transform_point_translation_and_scale() {
        let transform = Transform {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::identity(),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        let moved = transform.transform_point(Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(moved, Point3::new(12.0, 2.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_combine_places_child_in_parent_frame() {
        let parent = Transform::from_position_rotation(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(&Vec3::y_axis(), constants::PI / 2.0),
        );
        let child = Transform::from_position(Vec3::new(0.0, 0.0, 1.0));

        let combined = parent.combine(&child);

        // Child offset (0,0,1) rotated 90 degrees around Y lands at (1,0,0),
        // then the parent translation moves it to (2,0,0).
        assert_relative_eq!(combined.position, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_angle_between_axes() {
        let up = Vec3::new(0.0, 1.0, 0.0);
        let forward = Vec3::new(0.0, 0.0, -1.0);

        assert_relative_eq!(utils::angle_between(&up, &forward), constants::PI / 2.0, epsilon = EPSILON);
        assert_relative_eq!(utils::angle_between(&up, &up), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_lerp_point_endpoints_and_midpoint() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 4.0, -6.0);

        assert_relative_eq!(utils::lerp_point(a, b, 0.0), a, epsilon = EPSILON);
        assert_relative_eq!(utils::lerp_point(a, b, 1.0), b, epsilon = EPSILON);
        assert_relative_eq!(
            utils::lerp_point(a, b, 0.5),
            Point3::new(1.0, 2.0, -3.0),
            epsilon = EPSILON
        );
    }
}

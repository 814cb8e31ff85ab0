//! Dragon target model
//!
//! The dragon is an angular low-poly body built straight from flat vertex and
//! index arrays, the same way the hand-authored models arrive: face normals
//! and planar UVs are derived once at build time, and a dynamic AABB collider
//! tracks the body as the scene spins it.

use thiserror::Error;

use range_engine::foundation::color::Color;
use range_engine::foundation::math::{constants::TAU, Point3, Quat, Transform, Vec3};
use range_engine::geometry::{GeometryError, TriangleMesh};
use range_engine::physics::{Collider, ColliderError};

/// Phong-style color set carried per model (the render layer's contract)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse color
    pub color: Color,
    /// Emissive color
    pub emissive: Color,
    /// Specular color
    pub specular: Color,
}

/// Resting dragon colors
fn base_material() -> Material {
    Material {
        color: Color::from_hex(0xe5ffe5),
        emissive: Color::from_hex(0xb4ef3e),
        specular: Color::from_hex(0x003300),
    }
}

/// Errors from dragon construction
#[derive(Error, Debug)]
pub enum ModelError {
    /// The body mesh failed validation
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The collider could not bound the mesh
    #[error(transparent)]
    Collider(#[from] ColliderError),
}

/// Flat vertex coordinates of the body, three per vertex
fn body_vertices() -> Vec<f32> {
    vec![
        0.0, 10.0, -90.0, // nose
        0.0, 20.0, 90.0, // tail
        0.0, 60.0, 0.0, // spine
        0.0, -30.0, 0.0, // belly
        -80.0, 25.0, 0.0, // left wing
        80.0, 25.0, 0.0, // right wing
    ]
}

/// Triangle indices of the body, three per face
fn body_indices() -> Vec<u32> {
    vec![
        0, 2, 4, // nose, spine, left
        0, 5, 2, // nose, right, spine
        0, 4, 3, // nose, left, belly
        0, 3, 5, // nose, belly, right
        1, 4, 2, // tail, left, spine
        1, 2, 5, // tail, spine, right
        1, 3, 4, // tail, belly, left
        1, 5, 3, // tail, right, belly
    ]
}

/// The rotating target
#[derive(Debug)]
pub struct DragonModel {
    mesh: TriangleMesh,
    face_normals: Vec<f32>,
    uvs: Vec<f32>,
    collider: Collider,
    transform: Transform,
    material: Material,
    spin_rads: f32,
}

impl DragonModel {
    /// Build the dragon at `position` with a uniform scale
    pub fn new(position: Point3, scale: f32) -> Result<Self, ModelError> {
        let mesh = TriangleMesh::new(&body_vertices(), &body_indices())?;
        let face_normals = mesh.face_normals()?;
        let uvs = mesh.planar_uvs()?;

        // dynamic: the body rotates every frame
        let collider = Collider::new(false, mesh.points().to_vec())?;

        let transform = Transform {
            position: position.coords,
            rotation: Quat::identity(),
            scale: Vec3::new(scale, scale, scale),
        };

        let mut dragon = Self {
            mesh,
            face_normals,
            uvs,
            collider,
            transform,
            material: base_material(),
            spin_rads: 0.0,
        };
        dragon.update_collider();
        Ok(dragon)
    }

    /// Advance the idle rotation by `angle_rads`, wrapping at a full turn
    pub fn spin(&mut self, angle_rads: f32) {
        self.spin_rads += angle_rads;
        if self.spin_rads >= TAU {
            self.spin_rads = 0.0;
        }
        self.transform.rotation = Quat::from_axis_angle(&Vec3::y_axis(), self.spin_rads);
    }

    /// Refresh the world-space collision box from the current transform
    pub fn update_collider(&mut self) {
        self.collider.update_aabb(&self.transform.to_matrix());
    }

    /// Flash the whole material red on a hit
    pub fn apply_hit_material(&mut self) {
        let red = Color::from_hex(0xff0000);
        self.material = Material {
            color: red,
            emissive: red,
            specular: red,
        };
    }

    /// Restore the resting colors
    pub fn reset_material(&mut self) {
        self.material = base_material();
    }

    /// The body mesh
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Packed per-face normals, computed at build time
    pub fn face_normals(&self) -> &[f32] {
        &self.face_normals
    }

    /// Packed planar UVs, computed at build time
    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    /// The dragon's collision volume
    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Current world transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Current material colors
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Current idle-rotation angle, in radians
    pub fn spin_rads(&self) -> f32 {
        self.spin_rads
    }
}

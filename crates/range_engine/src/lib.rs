//! # Range Engine
//!
//! Core building blocks for frame-driven shooting-gallery demos:
//!
//! - **Foundation**: math types over nalgebra, millisecond timing, HSL colors
//! - **Geometry**: flat-array triangle meshes with face normals and planar UVs,
//!   Catmull-Rom spline sampling
//! - **Physics**: axis-aligned bounding boxes and object colliders
//! - **Registry**: insertion-ordered, name-addressed model storage
//! - **Driver**: explicit tick loop with pause, shutdown and periodic diagnostics
//!
//! There is no rendering, windowing or asset decoding here. Callers feed
//! world-space transforms in and read poses, spline samples and collision
//! verdicts back out, so the whole engine can be driven headlessly, including
//! from test harnesses supplying synthetic timestamps.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod driver;
pub mod foundation;
pub mod geometry;
pub mod physics;
pub mod registry;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        driver::{FrameDriver, Tick},
        foundation::{
            color::Color,
            math::{Mat4, Point3, Quat, Transform, Vec3},
            time::Timer,
        },
        geometry::{CatmullRom3, GeometryError, TriangleMesh},
        physics::{Aabb, Collider, ColliderError},
        registry::{ModelKey, ModelRegistry},
    };
}

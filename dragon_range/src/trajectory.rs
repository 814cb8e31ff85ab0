//! Ballistic trajectory generation
//!
//! A shot is described by two world-space joints (forearm and hand) plus a
//! power value, which here is the maximum horizontal distance the projectile
//! can cover. From those the generator derives a six-point control polygon
//! forming a ballistic arc, fits a Catmull-Rom spline through it and samples
//! a fixed number of points for the projectile to follow, with a hue-sweep
//! color per sample for the rendered trajectory line.

use thiserror::Error;

use range_engine::config::{Deserialize, Serialize};
use range_engine::foundation::color::Color;
use range_engine::foundation::math::{utils, Point3, Vec3};
use range_engine::geometry::{CatmullRom3, GeometryError};

/// Tuning for trajectory generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Damping applied to the launch inclination angle; 1.0 keeps the raw
    /// angle, smaller values flatten steep launches into gentler arcs
    pub angle_decay: f32,
    /// Number of spline samples the projectile will step through
    pub spline_segments: usize,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            angle_decay: 0.5,
            spline_segments: 30,
        }
    }
}

/// Errors from trajectory construction
#[derive(Error, Debug)]
pub enum TrajectoryError {
    /// Start and end coincide, so no launch direction exists
    #[error("start and end points coincide, launch direction is undefined")]
    DegenerateDirection,

    /// The launch direction is vertical, so its ground projection vanishes
    #[error("launch direction is vertical, ground projection is undefined")]
    VerticalLaunch,

    /// Power must be a positive distance
    #[error("max distance must be positive, got {0}")]
    NonPositiveDistance(f32),

    /// Spline construction failed
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

const DIRECTION_EPSILON: f32 = 1e-6;

/// An immutable, fully sampled ballistic arc
///
/// The control polygon and samples are fixed at build time; the projectile
/// and the rendered line both read from the same sample set, and everything
/// is dropped together when the shot cycle resets.
#[derive(Debug, Clone)]
pub struct Trajectory {
    control_points: [Point3; 6],
    samples: Vec<Point3>,
    colors: Vec<Color>,
}

impl Trajectory {
    /// Derive the arc for a shot from `start` through `end` with the given
    /// maximum distance
    ///
    /// `start` and `end` are the forearm and hand world positions; their
    /// difference fixes the launch direction. The control polygon is
    /// `[start, end, extended, peak, landing, landing]`:
    ///
    /// 1. the start→end segment is extended past `end` by its own length,
    /// 2. the inclination against the ground normal, damped by
    ///    `angle_decay`, gives the peak height via the right-triangle
    ///    relation `tan(angle) * (max_distance / 2)`,
    /// 3. landing and peak positions walk the ground projection of the
    ///    launch direction by `max_distance` and half of it respectively,
    /// 4. the landing point is duplicated to anchor the exit tangent.
    pub fn build(
        start: Point3,
        end: Point3,
        max_distance: f32,
        config: &TrajectoryConfig,
    ) -> Result<Self, TrajectoryError> {
        if max_distance <= 0.0 {
            return Err(TrajectoryError::NonPositiveDistance(max_distance));
        }

        let direction: Vec3 = end - start;
        let length = direction.magnitude();
        if length < DIRECTION_EPSILON {
            return Err(TrajectoryError::DegenerateDirection);
        }
        let direction = direction / length;

        let extended = end + direction * length;

        let ground_normal = Vec3::y();
        let inclination = utils::angle_between(&direction, &ground_normal) * config.angle_decay;

        let half_distance = max_distance / 2.0;
        let perpendicular = inclination.tan() * half_distance;

        let ground_direction = Vec3::new(direction.x, 0.0, direction.z);
        if ground_direction.magnitude() < DIRECTION_EPSILON {
            return Err(TrajectoryError::VerticalLaunch);
        }
        let ground_direction = ground_direction.normalize();

        let extended_ground = Point3::new(extended.x, 0.0, extended.z);

        let landing = extended_ground + ground_direction * max_distance;
        let peak = Point3::new(
            extended_ground.x + ground_direction.x * half_distance,
            extended.y + perpendicular,
            extended_ground.z + ground_direction.z * half_distance,
        );

        let control_points = [start, end, extended, peak, landing, landing];

        let spline = CatmullRom3::new(control_points.to_vec())?;
        let samples = spline.sample(config.spline_segments);

        let colors = (0..config.spline_segments)
            .map(|i| Color::from_hsl(i as f32 / config.spline_segments as f32, 1.0, 0.5))
            .collect();

        Ok(Self {
            control_points,
            samples,
            colors,
        })
    }

    /// The six-point control polygon the spline interpolates
    pub fn control_points(&self) -> &[Point3; 6] {
        &self.control_points
    }

    /// Sampled arc positions, in travel order
    pub fn samples(&self) -> &[Point3] {
        &self.samples
    }

    /// One visualization color per sample
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

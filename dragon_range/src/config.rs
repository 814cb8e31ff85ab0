//! Demo configuration
//!
//! One file-loadable structure grouping the tunables of every subsystem. All
//! fields default to the values the demo ships with, so a config file only
//! has to name what it changes.

use range_engine::config::{Config, Deserialize, Serialize};
use range_engine::foundation::math::Point3;

use crate::projectile::ProjectileConfig;
use crate::robot::FsmDurations;
use crate::trajectory::TrajectoryConfig;

/// Scene-level tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// World position of the dragon target
    pub dragon_position: Point3,

    /// Uniform scale of the dragon body
    pub dragon_scale: f32,

    /// Idle dragon rotation per frame, in degrees
    pub dragon_spin_degrees_per_frame: f32,

    /// Initial yaw of the robot arm, in degrees
    pub robot_aim_degrees: f32,

    /// Shot power when a cycle starts
    pub power_min: f32,

    /// Power added per extra shoot press while loading
    pub power_step: f32,

    /// Power ceiling
    pub power_max: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            dragon_position: Point3::new(200.0, -75.0, -250.0),
            dragon_scale: 1.0,
            dragon_spin_degrees_per_frame: 0.5,
            robot_aim_degrees: -40.0,
            power_min: 100.0,
            power_step: 50.0,
            power_max: 1000.0,
        }
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// State-machine timer durations
    pub fsm: FsmDurations,

    /// Trajectory generation tuning
    pub trajectory: TrajectoryConfig,

    /// Projectile motion tuning
    pub projectile: ProjectileConfig,

    /// Scene-level tunables
    pub scene: SceneConfig,
}

impl Config for DemoConfig {}

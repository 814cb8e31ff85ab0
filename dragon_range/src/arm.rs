//! Articulated robot arm
//!
//! A four-link chain (root, arm, forearm, hand) of TRS transforms. The scene
//! reads the forearm and hand world positions when a shot fires; their
//! difference is the launch direction, so the hand link carries a forward
//! offset and the forearm pitch animates while a bullet is loading.

use range_engine::foundation::math::{constants::TAU, utils, Quat, Transform, Point3, Vec3};

/// Forearm pitch advance per frame while loading (10 degrees)
const LOADING_SPIN_RADS: f32 = 0.174_533;

/// The robot arm's link chain
#[derive(Debug)]
pub struct RobotArm {
    root: Transform,
    arm: Transform,
    forearm: Transform,
    hand: Transform,
    aim_rads: f32,
    forearm_pitch_rads: f32,
}

impl RobotArm {
    /// Build the chain with its rest offsets, aimed at `aim_degrees` yaw
    pub fn new(aim_degrees: f32) -> Self {
        let mut arm = Self {
            root: Transform::from_position(Vec3::new(0.0, 8.0, 0.0)),
            arm: Transform::from_position(Vec3::new(0.0, 60.0, 0.0)),
            forearm: Transform::from_position(Vec3::new(0.0, 50.0, 0.0)),
            hand: Transform::from_position(Vec3::new(0.0, 30.0, -35.0)),
            aim_rads: 0.0,
            forearm_pitch_rads: 0.0,
        };
        arm.set_aim_degrees(aim_degrees);
        arm
    }

    /// Point the whole arm at a yaw angle, in degrees
    pub fn set_aim_degrees(&mut self, degrees: f32) {
        self.aim_rads = utils::deg_to_rad(degrees);
        self.root.rotation = Quat::from_axis_angle(&Vec3::y_axis(), self.aim_rads);
    }

    /// Current yaw, in radians
    pub fn aim_rads(&self) -> f32 {
        self.aim_rads
    }

    /// Advance the loading animation one frame (forearm pitch, wrapping)
    pub fn spin_forearm(&mut self) {
        self.forearm_pitch_rads += LOADING_SPIN_RADS;
        if self.forearm_pitch_rads >= TAU {
            self.forearm_pitch_rads = 0.0;
        }
        self.forearm.rotation = Quat::from_axis_angle(&Vec3::x_axis(), self.forearm_pitch_rads);
    }

    /// Current forearm pitch, in radians
    pub fn forearm_pitch_rads(&self) -> f32 {
        self.forearm_pitch_rads
    }

    /// World transform of the forearm link
    fn forearm_world(&self) -> Transform {
        self.root.combine(&self.arm).combine(&self.forearm)
    }

    /// World-space forearm joint position
    pub fn forearm_world_position(&self) -> Point3 {
        Point3::from(self.forearm_world().position)
    }

    /// World-space hand joint position
    pub fn hand_world_position(&self) -> Point3 {
        Point3::from(self.forearm_world().combine(&self.hand).position)
    }
}

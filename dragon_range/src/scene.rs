//! Dragon-range scene wiring
//!
//! Owns the actors and runs one tick of the demo: spin the dragon, animate
//! the loading arm, move the bullet, then update the state machine and apply
//! the one-shot side effects of whatever transition it performed. All
//! externally triggered mutation (the shoot control, aiming) enters through
//! methods called on the tick thread, so the state machine never sees a
//! concurrent writer.

use thiserror::Error;

use range_engine::driver::Tick;
use range_engine::foundation::color::Color;
use range_engine::foundation::math::{utils, Mat4, Point3};
use range_engine::physics::{Collider, ColliderError};
use range_engine::registry::ModelRegistry;

use crate::arm::RobotArm;
use crate::config::DemoConfig;
use crate::dragon::{DragonModel, ModelError};
use crate::projectile::{Projectile, ProjectileConfig, ProjectileError};
use crate::robot::{RobotEvent, RobotFsm, RobotState};
use crate::trajectory::{Trajectory, TrajectoryError};

/// Bullet collision half-extent, matching the rendered sphere radius
const BULLET_RADIUS: f32 = 22.0;

/// Bullet pitch advance per frame in flight (10 degrees)
const BULLET_SPIN_RADS: f32 = 0.174_533;

/// Bullet diffuse color
const BULLET_COLOR: u32 = 0xd76009;

/// Errors from assembling a shot
#[derive(Error, Debug)]
pub enum ShotError {
    /// Trajectory generation failed
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    /// Projectile could not be spawned
    #[error(transparent)]
    Projectile(#[from] ProjectileError),

    /// Bullet collider could not be built
    #[error(transparent)]
    Collider(#[from] ColliderError),
}

/// Pose and tint of one registered renderable, which is all the render layer reads
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// World position
    pub position: Point3,
    /// Diffuse tint
    pub color: Color,
}

/// A bullet in flight: motion controller plus collision volume
#[derive(Debug)]
struct Bullet {
    projectile: Projectile,
    collider: Collider,
    pitch_rads: f32,
}

impl Bullet {
    fn new(
        samples: &[Point3],
        config: &ProjectileConfig,
        now_ms: f64,
    ) -> Result<Self, ShotError> {
        let projectile = Projectile::new(samples, config, now_ms)?;

        let collider = Collider::new(
            false,
            vec![
                Point3::new(-BULLET_RADIUS, -BULLET_RADIUS, -BULLET_RADIUS),
                Point3::new(BULLET_RADIUS, BULLET_RADIUS, BULLET_RADIUS),
            ],
        )?;

        let mut bullet = Self {
            projectile,
            collider,
            pitch_rads: 0.0,
        };
        bullet.update_collider();
        Ok(bullet)
    }

    fn update_collider(&mut self) {
        let world = Mat4::new_translation(&self.projectile.position().coords);
        self.collider.update_aabb(&world);
    }

    fn spin(&mut self) {
        self.pitch_rads -= BULLET_SPIN_RADS;
    }
}

/// The whole demo scene
pub struct DragonScene {
    config: DemoConfig,
    registry: ModelRegistry<SceneNode>,
    fsm: RobotFsm,
    arm: RobotArm,
    dragon: DragonModel,
    trajectory: Option<Trajectory>,
    bullet: Option<Bullet>,
    power: f32,
    cycles_completed: u32,
    last_outcome: Option<RobotState>,
}

impl DragonScene {
    /// Assemble the scene from configuration
    pub fn new(config: DemoConfig) -> Result<Self, ModelError> {
        let dragon = DragonModel::new(config.scene.dragon_position, config.scene.dragon_scale)?;
        let arm = RobotArm::new(config.scene.robot_aim_degrees);
        let fsm = RobotFsm::new(config.fsm.clone());

        let mut registry = ModelRegistry::new();
        registry.insert(
            "floor",
            SceneNode {
                position: Point3::origin(),
                color: Color::from_hex(0xb35900),
            },
        );
        registry.insert(
            "dragon",
            SceneNode {
                position: config.scene.dragon_position,
                color: dragon.material().color,
            },
        );
        registry.insert(
            "robot",
            SceneNode {
                position: arm.forearm_world_position(),
                color: Color::from_hex(0xbfbfbf),
            },
        );

        let power = config.scene.power_min;

        Ok(Self {
            config,
            registry,
            fsm,
            arm,
            dragon,
            trajectory: None,
            bullet: None,
            power,
            cycles_completed: 0,
            last_outcome: None,
        })
    }

    /// One full scene tick at `now_ms`
    pub fn advance(&mut self, now_ms: f64) {
        self.update_dragon();
        self.update_robot();
        self.update_bullet(now_ms);
        self.process_fsm(now_ms);
    }

    /// Shoot control, serialized onto the tick thread
    ///
    /// In `Idle` this starts a cycle; while loading, each extra press grows
    /// the shot power by one step, clamped to the configured range.
    pub fn press_shoot(&mut self, now_ms: f64) {
        if self.fsm.is_idle() {
            self.fsm.transit(RobotEvent::ShootStarted, now_ms);
            log::info!("robot status: {:?}", self.fsm.state());
        } else if self.fsm.is_loading_bullet() {
            self.power = utils::clamp(
                self.power + self.config.scene.power_step,
                self.config.scene.power_min,
                self.config.scene.power_max,
            );
            log::debug!("shot power raised to {}", self.power);
        }
    }

    /// Point the robot arm, in degrees of yaw
    pub fn set_aim_degrees(&mut self, degrees: f32) {
        self.arm.set_aim_degrees(degrees);
    }

    fn update_dragon(&mut self) {
        // the target freezes (and stays red) while a hit is displayed
        if !self.fsm.is_hit() {
            let step = utils::deg_to_rad(self.config.scene.dragon_spin_degrees_per_frame);
            self.dragon.spin(step);
            self.dragon.update_collider();
        }
    }

    fn update_robot(&mut self) {
        if self.fsm.is_loading_bullet() {
            self.arm.spin_forearm();
        }
    }

    fn update_bullet(&mut self, now_ms: f64) {
        match self.fsm.state() {
            RobotState::BulletTraveling => {
                if let Some(bullet) = &mut self.bullet {
                    bullet.projectile.advance_interpolated(now_ms);
                    bullet.spin();
                    bullet.update_collider();

                    let position = bullet.projectile.position();
                    if let Some(node) = self.registry.get_mut("bullet") {
                        node.position = position;
                    }
                }
            }
            RobotState::Hit => {
                if let Some(bullet) = &mut self.bullet {
                    bullet.spin();
                }
            }
            _ => {}
        }
    }

    fn process_fsm(&mut self, now_ms: f64) {
        self.fsm.update(now_ms, || match &self.bullet {
            Some(bullet) => bullet.collider.is_colliding_with(self.dragon.collider().aabb()),
            None => false,
        });

        if !self.fsm.state_has_changed() {
            return;
        }

        log::info!("robot status: {:?}", self.fsm.state());

        if self.fsm.is_bullet_traveling() {
            if let Err(e) = self.spawn_shot(now_ms) {
                // the cycle still times out and resets on its own
                log::error!("shot could not be built: {e}");
            }
        } else if self.fsm.is_hit() {
            self.dragon.apply_hit_material();
            self.last_outcome = Some(RobotState::Hit);

            let hit_color = self.dragon.material().color;
            if let Some(node) = self.registry.get_mut("dragon") {
                node.color = hit_color;
            }
        } else if self.fsm.is_no_hit() {
            self.last_outcome = Some(RobotState::NoHit);
        } else if self.fsm.is_idle() {
            self.clear_shot();
            self.dragon.reset_material();
            self.power = self.config.scene.power_min;
            self.cycles_completed += 1;

            let rest_color = self.dragon.material().color;
            if let Some(node) = self.registry.get_mut("dragon") {
                node.color = rest_color;
            }
        }
    }

    /// Build the trajectory and bullet for the shot that just fired
    fn spawn_shot(&mut self, now_ms: f64) -> Result<(), ShotError> {
        self.clear_shot();

        let start = self.arm.forearm_world_position();
        let end = self.arm.hand_world_position();

        let trajectory = Trajectory::build(start, end, self.power, &self.config.trajectory)?;
        let bullet = Bullet::new(trajectory.samples(), &self.config.projectile, now_ms)?;

        self.registry.insert(
            "trajectory",
            SceneNode {
                position: start,
                color: trajectory.colors()[0],
            },
        );
        self.registry.insert(
            "bullet",
            SceneNode {
                position: bullet.projectile.position(),
                color: Color::from_hex(BULLET_COLOR),
            },
        );

        self.trajectory = Some(trajectory);
        self.bullet = Some(bullet);
        Ok(())
    }

    /// Drop the shot artifacts, if any were built this cycle
    fn clear_shot(&mut self) {
        if self.trajectory.take().is_some() {
            self.registry.remove("trajectory");
        }
        if self.bullet.take().is_some() {
            self.registry.remove("bullet");
        }
    }

    /// Current state of the robot's cycle
    pub fn robot_state(&self) -> RobotState {
        self.fsm.state()
    }

    /// Current shot power
    pub fn power(&self) -> f32 {
        self.power
    }

    /// Completed shoot cycles (back in `Idle`)
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Outcome of the most recent cycle, `Hit` or `NoHit`
    pub fn last_outcome(&self) -> Option<RobotState> {
        self.last_outcome
    }

    /// The live trajectory, while a shot is in flight or displayed
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    /// Bullet world position, while one exists
    pub fn bullet_position(&self) -> Option<Point3> {
        self.bullet.as_ref().map(|b| b.projectile.position())
    }

    /// The dragon target
    pub fn dragon(&self) -> &DragonModel {
        &self.dragon
    }

    /// The renderable registry, in scene-assembly order
    pub fn registry(&self) -> &ModelRegistry<SceneNode> {
        &self.registry
    }
}

impl Tick for DragonScene {
    fn update(&mut self, _elapsed_ms: f64, now_ms: f64) {
        self.advance(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;

    fn fast_config() -> DemoConfig {
        let mut config = DemoConfig::default();
        config.fsm.loading_ms = 100.0;
        config.fsm.traveling_ms = 400.0;
        config.fsm.restart_ms = 100.0;
        config.projectile.step_duration_ms = 10.0;
        config
    }

    /// Dragon parked far outside any reachable trajectory
    fn miss_config() -> DemoConfig {
        let mut config = fast_config();
        config.scene.dragon_position = Point3::new(50_000.0, 0.0, 50_000.0);
        config
    }

    /// Dragon scaled up to swallow the launch area whole
    fn hit_config() -> DemoConfig {
        let mut config = fast_config();
        config.scene.dragon_position = Point3::new(0.0, 100.0, -100.0);
        config.scene.dragon_scale = 40.0;
        config
    }

    fn run_until<F: Fn(&DragonScene) -> bool>(
        scene: &mut DragonScene,
        start_ms: f64,
        step_ms: f64,
        max_ticks: usize,
        predicate: F,
    ) -> f64 {
        let mut now = start_ms;
        for _ in 0..max_ticks {
            if predicate(scene) {
                return now;
            }
            now += step_ms;
            scene.advance(now);
        }
        panic!("scene never reached the expected condition");
    }

    #[test]
    fn test_initial_registry_order() {
        let scene = DragonScene::new(DemoConfig::default()).unwrap();
        let names: Vec<&str> = scene.registry().iter_named().map(|(n, _)| n).collect();

        assert_eq!(names, vec!["floor", "dragon", "robot"]);
    }

    #[test]
    fn test_shoot_presses_start_and_charge() {
        let mut scene = DragonScene::new(miss_config()).unwrap();
        assert_eq!(scene.robot_state(), RobotState::Idle);

        scene.press_shoot(0.0);
        assert_eq!(scene.robot_state(), RobotState::LoadingBullet);
        assert!((scene.power() - 100.0).abs() < 1e-6);

        scene.press_shoot(10.0);
        scene.press_shoot(20.0);
        assert!((scene.power() - 200.0).abs() < 1e-6);

        // clamped at the ceiling
        for i in 0..100 {
            scene.press_shoot(30.0 + f64::from(i));
        }
        assert!((scene.power() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_missed_shot_runs_the_full_cycle() {
        let mut scene = DragonScene::new(miss_config()).unwrap();

        scene.press_shoot(0.0);
        run_until(&mut scene, 0.0, 16.0, 50, |s| {
            s.robot_state() == RobotState::BulletTraveling
        });

        // shot artifacts exist while traveling
        assert!(scene.trajectory().is_some());
        assert!(scene.bullet_position().is_some());
        assert!(scene.registry().contains("trajectory"));
        assert!(scene.registry().contains("bullet"));

        run_until(&mut scene, 200.0, 16.0, 100, |s| {
            s.robot_state() == RobotState::NoHit
        });

        run_until(&mut scene, 700.0, 16.0, 100, |s| s.robot_state() == RobotState::Idle);

        assert_eq!(scene.cycles_completed(), 1);
        assert_eq!(scene.last_outcome(), Some(RobotState::NoHit));
        assert!(scene.trajectory().is_none());
        assert!(scene.bullet_position().is_none());
        assert!(!scene.registry().contains("trajectory"));
        assert!(!scene.registry().contains("bullet"));
        assert!((scene.power() - scene.config.scene.power_min).abs() < 1e-6);
    }

    #[test]
    fn test_point_blank_shot_hits_and_recolors_the_dragon() {
        let mut scene = DragonScene::new(hit_config()).unwrap();
        let rest_color = scene.dragon().material().color;

        scene.press_shoot(0.0);
        run_until(&mut scene, 0.0, 16.0, 200, |s| s.robot_state() == RobotState::Hit);

        assert_ne!(scene.dragon().material().color, rest_color);
        assert_eq!(scene.last_outcome(), Some(RobotState::Hit));

        run_until(&mut scene, 600.0, 16.0, 100, |s| s.robot_state() == RobotState::Idle);

        assert_eq!(scene.dragon().material().color, rest_color);
        assert_eq!(scene.cycles_completed(), 1);
    }

    #[test]
    fn test_dragon_freezes_while_hit_is_displayed() {
        let mut scene = DragonScene::new(hit_config()).unwrap();

        scene.press_shoot(0.0);
        let hit_at = run_until(&mut scene, 0.0, 16.0, 200, |s| {
            s.robot_state() == RobotState::Hit
        });

        let frozen = scene.dragon().spin_rads();
        scene.advance(hit_at + 16.0);
        scene.advance(hit_at + 32.0);

        assert!(scene.robot_state() == RobotState::Hit || scene.robot_state() == RobotState::Idle);
        if scene.robot_state() == RobotState::Hit {
            assert!((scene.dragon().spin_rads() - frozen).abs() < 1e-6);
        }
    }
}

//! End-to-end shot-cycle scenarios, driven with synthetic timestamps
//!
//! The frame driver's `step_with` lets these tests walk the whole
//! press/charge/fire/resolve/reset cycle at the default durations without
//! waiting on a real clock.

use range_engine::driver::FrameDriver;
use range_engine::foundation::math::Point3;

use dragon_range::config::DemoConfig;
use dragon_range::robot::RobotState;
use dragon_range::scene::DragonScene;
use dragon_range::trajectory::{Trajectory, TrajectoryConfig};

const STEP_MS: f64 = 16.0;

fn advance_until(
    driver: &mut FrameDriver,
    scene: &mut DragonScene,
    now: &mut f64,
    deadline_ms: f64,
    target: RobotState,
) {
    while scene.robot_state() != target {
        *now += STEP_MS;
        assert!(
            *now <= deadline_ms,
            "never reached {target:?}, stuck in {:?} at {now} ms",
            scene.robot_state()
        );
        driver.step_with(*now, scene);
    }
}

#[test]
fn missed_shot_cycles_back_to_idle() {
    let mut config = DemoConfig::default();
    // park the target far outside any reachable trajectory
    config.scene.dragon_position = Point3::new(100_000.0, 0.0, 100_000.0);

    let mut scene = DragonScene::new(config).unwrap();
    let mut driver = FrameDriver::new();
    let mut now = 0.0;

    assert_eq!(scene.robot_state(), RobotState::Idle);
    scene.press_shoot(now);
    assert_eq!(scene.robot_state(), RobotState::LoadingBullet);

    // the charge window holds for its full 2000 ms
    while now + STEP_MS < 2000.0 {
        now += STEP_MS;
        driver.step_with(now, &mut scene);
        assert_eq!(scene.robot_state(), RobotState::LoadingBullet);
    }

    now += STEP_MS;
    driver.step_with(now, &mut scene);
    assert_eq!(scene.robot_state(), RobotState::BulletTraveling);
    let traveling_from = now;

    // the shot artifacts exist and agree on the sample count
    let trajectory = scene.trajectory().expect("trajectory built on fire");
    assert_eq!(trajectory.samples().len(), 30);
    assert_eq!(trajectory.colors().len(), 30);
    assert!(scene.bullet_position().is_some());

    // the whole travel window passes without a hit
    while scene.robot_state() == RobotState::BulletTraveling {
        now += STEP_MS;
        driver.step_with(now, &mut scene);
        assert!(now <= traveling_from + 5000.0 + STEP_MS);
    }
    assert_eq!(scene.robot_state(), RobotState::NoHit);
    assert!(now - traveling_from >= 5000.0);

    let deadline = now + 1000.0 + 2.0 * STEP_MS;
    advance_until(
        &mut driver,
        &mut scene,
        &mut now,
        deadline,
        RobotState::Idle,
    );

    assert_eq!(scene.cycles_completed(), 1);
    assert_eq!(scene.last_outcome(), Some(RobotState::NoHit));
    assert!(scene.trajectory().is_none());
    assert!(scene.bullet_position().is_none());
}

#[test]
fn hit_preempts_the_travel_timeout() {
    let mut config = DemoConfig::default();
    // scale the target up until it swallows the launch area
    config.scene.dragon_position = Point3::new(0.0, 100.0, -100.0);
    config.scene.dragon_scale = 40.0;

    let mut scene = DragonScene::new(config).unwrap();
    let mut driver = FrameDriver::new();
    let mut now = 0.0;

    let rest_color = scene.dragon().material().color;

    scene.press_shoot(now);
    advance_until(
        &mut driver,
        &mut scene,
        &mut now,
        3000.0,
        RobotState::BulletTraveling,
    );
    let traveling_from = now;

    advance_until(&mut driver, &mut scene, &mut now, 8000.0, RobotState::Hit);

    // collision resolved strictly before the timeout would have fired
    assert!(now < traveling_from + 5000.0);
    assert_ne!(scene.dragon().material().color, rest_color);

    let deadline = now + 1000.0 + 2.0 * STEP_MS;
    advance_until(
        &mut driver,
        &mut scene,
        &mut now,
        deadline,
        RobotState::Idle,
    );

    assert_eq!(scene.last_outcome(), Some(RobotState::Hit));
    assert_eq!(scene.dragon().material().color, rest_color);
    assert_eq!(scene.cycles_completed(), 1);
}

#[test]
fn trajectory_arcs_up_and_covers_the_power_distance() {
    let trajectory = Trajectory::build(
        Point3::origin(),
        Point3::new(0.0, 0.0, -10.0),
        100.0,
        &TrajectoryConfig::default(),
    )
    .unwrap();

    let [_, _, extended, peak, landing, _] = *trajectory.control_points();

    assert!(peak.y > 0.0, "ballistic arc must rise above the ground");

    let extended_ground = Point3::new(extended.x, 0.0, extended.z);
    let covered = (landing - extended_ground).magnitude();
    assert!((covered - 100.0).abs() < 1e-3);

    // the sampled path ends right next to the landing point
    let last = trajectory.samples().last().copied().unwrap();
    assert!((landing - last).magnitude() < 2.0);
}

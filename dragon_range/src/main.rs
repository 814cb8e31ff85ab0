//! Headless dragon-range demo
//!
//! Runs one scripted shot cycle through the frame driver: press the shoot
//! control, keep pressing while the bullet charges to grow the power, then
//! let the state machine carry the shot to `Hit` or `NoHit` and back to
//! `Idle`, logging every transition on the way.
//!
//! An optional argument names a TOML or RON config file; missing or invalid
//! files fall back to the built-in defaults.

use range_engine::config::Config;
use range_engine::driver::{FrameDriver, Tick};
use range_engine::foundation::logging;

use dragon_range::config::DemoConfig;
use dragon_range::robot::RobotState;
use dragon_range::scene::DragonScene;

/// Extra shoot presses issued while loading, each one growing the power
const POWER_PRESSES: u32 = 3;

/// Scripted input on top of the scene
///
/// Stands in for the GUI shoot button: presses are issued from inside the
/// tick, so they are serialized with every other state-machine access.
struct DemoApp {
    scene: DragonScene,
    shot_started: bool,
    power_presses_left: u32,
}

impl DemoApp {
    fn new(scene: DragonScene) -> Self {
        Self {
            scene,
            shot_started: false,
            power_presses_left: POWER_PRESSES,
        }
    }
}

impl Tick for DemoApp {
    fn update(&mut self, elapsed_ms: f64, now_ms: f64) {
        match self.scene.robot_state() {
            RobotState::Idle if !self.shot_started => {
                self.scene.press_shoot(now_ms);
                self.shot_started = true;
            }
            RobotState::LoadingBullet if self.power_presses_left > 0 => {
                self.scene.press_shoot(now_ms);
                self.power_presses_left -= 1;
            }
            _ => {}
        }

        self.scene.update(elapsed_ms, now_ms);
    }

    fn done(&self) -> bool {
        self.shot_started && self.scene.cycles_completed() >= 1
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = DemoConfig::load_or_default(std::env::args().nth(1).as_deref());
    let scene = DragonScene::new(config)?;
    let mut app = DemoApp::new(scene);

    log::info!("dragon range: firing one scripted shot cycle");

    let mut driver = FrameDriver::new();
    driver.run(&mut app);

    match app.scene.last_outcome() {
        Some(RobotState::Hit) => log::info!("the dragon was hit"),
        Some(RobotState::NoHit) => log::info!("the shot missed"),
        _ => log::warn!("cycle finished without an outcome"),
    }

    Ok(())
}

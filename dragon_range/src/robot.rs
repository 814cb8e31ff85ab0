//! Shoot-cycle finite-state machine for the robot arm
//!
//! The cycle is: `Idle` until the user starts a shot, `LoadingBullet` while
//! the arm charges, `BulletTraveling` while the projectile follows its
//! trajectory, then `Hit` or `NoHit` depending on whether the collision
//! predicate fired before the travel window closed, and back to `Idle` after
//! a short restart pause.
//!
//! All timers compare explicit millisecond timestamps handed in by the
//! caller, so the machine can be driven by the frame loop or by a test
//! harness with a synthetic clock.

use range_engine::config::{Deserialize, Serialize};

/// States the shooting robot can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotState {
    /// Waiting for the user to start a shot
    Idle,
    /// Shot started, charging the bullet (longer charge, bigger power)
    LoadingBullet,
    /// Bullet fired and following its trajectory
    BulletTraveling,
    /// Bullet struck the target mid-trajectory
    Hit,
    /// Trajectory ended without a strike
    NoHit,
}

/// Events the shooting robot reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotEvent {
    /// User pressed the shoot control
    ShootStarted,
    /// Charge window closed, the bullet leaves the arm
    ShootEnded,
    /// The bullet's collider overlapped the target's
    BulletCollided,
    /// The bullet exhausted its trajectory without a hit
    EndOfTrajectory,
    /// Post-shot pause finished, return to idle
    Restart,
}

/// Per-state durations in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FsmDurations {
    /// How long a shot charges before it fires
    pub loading_ms: f64,
    /// Travel window before the trajectory is declared exhausted
    pub traveling_ms: f64,
    /// Pause in `Hit`/`NoHit` before returning to `Idle`
    pub restart_ms: f64,
}

impl Default for FsmDurations {
    fn default() -> Self {
        Self {
            loading_ms: 2000.0,
            traveling_ms: 5000.0,
            restart_ms: 1000.0,
        }
    }
}

/// The robot's state machine
///
/// Exactly one state is current at any time, and exactly one timer is armed
/// outside `Idle`, matching the current state.
#[derive(Debug)]
pub struct RobotFsm {
    state: RobotState,
    prev_state: RobotState,
    durations: FsmDurations,
    loading_started_ms: Option<f64>,
    traveling_started_ms: Option<f64>,
    restart_started_ms: Option<f64>,
}

impl RobotFsm {
    /// Create the machine in `Idle` with no timers armed
    pub fn new(durations: FsmDurations) -> Self {
        Self {
            state: RobotState::Idle,
            prev_state: RobotState::Idle,
            durations,
            loading_started_ms: None,
            traveling_started_ms: None,
            restart_started_ms: None,
        }
    }

    /// The fixed transition table
    ///
    /// `None` for every (state, event) pair that is not one of the six legal
    /// transitions.
    fn destination(state: RobotState, event: RobotEvent) -> Option<RobotState> {
        use RobotEvent as E;
        use RobotState as S;

        match (state, event) {
            (S::Idle, E::ShootStarted) => Some(S::LoadingBullet),
            (S::LoadingBullet, E::ShootEnded) => Some(S::BulletTraveling),
            (S::BulletTraveling, E::BulletCollided) => Some(S::Hit),
            (S::BulletTraveling, E::EndOfTrajectory) => Some(S::NoHit),
            (S::Hit | S::NoHit, E::Restart) => Some(S::Idle),
            _ => None,
        }
    }

    /// Apply `event` at time `now_ms`
    ///
    /// Returns true when the event was legal for the current state and a
    /// transition happened. An illegal event is advisory only: it is logged
    /// and the state is left untouched.
    ///
    /// Entering a state arms its timer and clears the one it supersedes:
    /// `LoadingBullet` arms loading; `BulletTraveling` clears loading and
    /// arms traveling; `Hit`/`NoHit` clear traveling and arm restart; `Idle`
    /// clears restart.
    pub fn transit(&mut self, event: RobotEvent, now_ms: f64) -> bool {
        let Some(dest) = Self::destination(self.state, event) else {
            log::warn!(
                "event {event:?} not allowed in current state {:?}",
                self.state
            );
            return false;
        };

        log::debug!("robot: {:?} -> {dest:?} on {event:?}", self.state);
        self.state = dest;

        match dest {
            RobotState::Idle => {
                self.restart_started_ms = None;
            }
            RobotState::LoadingBullet => {
                self.loading_started_ms = Some(now_ms);
            }
            RobotState::BulletTraveling => {
                self.loading_started_ms = None;
                self.traveling_started_ms = Some(now_ms);
            }
            RobotState::Hit | RobotState::NoHit => {
                self.traveling_started_ms = None;
                self.restart_started_ms = Some(now_ms);
            }
        }

        true
    }

    /// Per-tick update: fire whichever timed event the current state owes
    ///
    /// - `Idle`: nothing to do until an external `ShootStarted`.
    /// - `LoadingBullet`: fires `ShootEnded` when the charge window closes.
    /// - `BulletTraveling`: fires `EndOfTrajectory` on timeout; otherwise the
    ///   collision predicate is consulted and a reported overlap fires
    ///   `BulletCollided`. Collision pre-empts the timeout, and at most one
    ///   of the two fires per tick.
    /// - `Hit`/`NoHit`: fires `Restart` when the pause elapses.
    ///
    /// The collision check is passed in per call (rather than captured at
    /// construction) so callers decide what "colliding" means each tick and
    /// tests can script it.
    pub fn update(&mut self, now_ms: f64, collision_check: impl FnOnce() -> bool) {
        self.prev_state = self.state;

        match self.state {
            RobotState::Idle => {}
            RobotState::LoadingBullet => {
                if self.loading_expired(now_ms) {
                    self.transit(RobotEvent::ShootEnded, now_ms);
                }
            }
            RobotState::BulletTraveling => {
                if self.traveling_expired(now_ms) {
                    self.transit(RobotEvent::EndOfTrajectory, now_ms);
                } else if collision_check() {
                    self.transit(RobotEvent::BulletCollided, now_ms);
                }
            }
            RobotState::Hit | RobotState::NoHit => {
                if self.restart_expired(now_ms) {
                    self.transit(RobotEvent::Restart, now_ms);
                }
            }
        }
    }

    /// True exactly when the last `update` call performed a transition
    ///
    /// Callers key one-shot side effects (spawning the trajectory, recoloring
    /// the target) off this instead of re-triggering every frame. External
    /// `transit` calls between updates are not reported here; their callers
    /// already know a transition happened from the return value.
    pub fn state_has_changed(&self) -> bool {
        self.prev_state != self.state
    }

    /// Current state
    pub fn state(&self) -> RobotState {
        self.state
    }

    /// True in `Idle`
    pub fn is_idle(&self) -> bool {
        self.state == RobotState::Idle
    }

    /// True in `LoadingBullet`
    pub fn is_loading_bullet(&self) -> bool {
        self.state == RobotState::LoadingBullet
    }

    /// True in `BulletTraveling`
    pub fn is_bullet_traveling(&self) -> bool {
        self.state == RobotState::BulletTraveling
    }

    /// True in `Hit`
    pub fn is_hit(&self) -> bool {
        self.state == RobotState::Hit
    }

    /// True in `NoHit`
    pub fn is_no_hit(&self) -> bool {
        self.state == RobotState::NoHit
    }

    /// Charge window has closed
    ///
    /// False outside `LoadingBullet` or while no timer is armed.
    pub fn loading_expired(&self, now_ms: f64) -> bool {
        self.state == RobotState::LoadingBullet
            && self
                .loading_started_ms
                .is_some_and(|start| now_ms - start >= self.durations.loading_ms)
    }

    /// Travel window has closed
    pub fn traveling_expired(&self, now_ms: f64) -> bool {
        self.state == RobotState::BulletTraveling
            && self
                .traveling_started_ms
                .is_some_and(|start| now_ms - start >= self.durations.traveling_ms)
    }

    /// Post-shot pause has elapsed
    pub fn restart_expired(&self, now_ms: f64) -> bool {
        matches!(self.state, RobotState::Hit | RobotState::NoHit)
            && self
                .restart_started_ms
                .is_some_and(|start| now_ms - start >= self.durations.restart_ms)
    }
}

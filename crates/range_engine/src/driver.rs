//! Tick-driven frame loop
//!
//! The driver is the only place that reads the real clock. Everything it
//! calls receives explicit `(elapsed_ms, now_ms)` values, so scenes and state
//! machines stay plain functions of time that a test harness can drive with
//! synthetic timestamps through `step_with`.
//!
//! Execution is single-threaded and cooperative: one tick runs to completion
//! before the next is considered, and shutdown (`Tick::done`) is observed
//! between ticks, never mid-tick.

use std::time::Duration;

use crate::foundation::time::Timer;

/// Per-frame update contract for scenes driven by [`FrameDriver`]
pub trait Tick {
    /// Advance by `elapsed_ms` since the previous tick; `now_ms` is the
    /// absolute timestamp, both from the same monotonic clock
    fn update(&mut self, elapsed_ms: f64, now_ms: f64);

    /// True once the scene wants the loop to stop
    fn done(&self) -> bool {
        false
    }
}

/// Interval between frame-count diagnostics
const DIAGNOSTICS_PERIOD_MS: f64 = 5000.0;

/// Approximate display refresh period the headless loop paces itself to
const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Frame loop with pause, shutdown and periodic diagnostics
pub struct FrameDriver {
    timer: Timer,
    paused: bool,
    frame_count: u64,
    last_tick_ms: f64,
    last_diagnostics_ms: f64,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    /// Create a driver with a fresh monotonic clock
    pub fn new() -> Self {
        Self {
            timer: Timer::new(),
            paused: false,
            frame_count: 0,
            last_tick_ms: 0.0,
            last_diagnostics_ms: 0.0,
        }
    }

    /// Pause or resume scene updates
    ///
    /// While paused, ticks still count frames but the scene is not updated,
    /// so no simulation time passes for it.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// True while scene updates are suspended
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks issued so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Issue one tick with an externally supplied timestamp
    ///
    /// Timestamps must be non-decreasing across calls; test harnesses use
    /// this to drive scenes with synthetic clocks.
    pub fn step_with(&mut self, now_ms: f64, scene: &mut impl Tick) {
        let elapsed_ms = now_ms - self.last_tick_ms;
        self.last_tick_ms = now_ms;

        if !self.paused {
            scene.update(elapsed_ms, now_ms);
        }

        self.frame_count += 1;

        if now_ms - self.last_diagnostics_ms > DIAGNOSTICS_PERIOD_MS {
            self.last_diagnostics_ms = now_ms;
            log::info!("FrameDriver: {} frames at {:.0} ms", self.frame_count, now_ms);
        }
    }

    /// Issue one tick from the real clock
    pub fn step(&mut self, scene: &mut impl Tick) {
        let now_ms = self.timer.tick();
        self.step_with(now_ms, scene);
    }

    /// Run ticks until the scene reports `done`
    ///
    /// An in-flight tick always completes; `done` is only observed between
    /// ticks. The loop sleeps to approximate a display refresh cadence.
    pub fn run(&mut self, scene: &mut impl Tick) {
        while !scene.done() {
            self.step(scene);
            std::thread::sleep(FRAME_PERIOD);
        }

        log::info!("FrameDriver: stopped after {} frames", self.frame_count);
    }
}

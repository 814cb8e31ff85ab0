//! Projectile motion along a sampled trajectory
//!
//! The projectile walks the trajectory's sample points one step at a time.
//! Two advancement styles share the same index bookkeeping: a discrete jump
//! to the next sample, and time-based linear interpolation that smooths the
//! position between consecutive samples over a fixed step duration.

use thiserror::Error;

use range_engine::config::{Deserialize, Serialize};
use range_engine::foundation::math::{utils, Point3};

/// Projectile tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Time between two consecutive trajectory samples
    pub step_duration_ms: f64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            step_duration_ms: 75.0,
        }
    }
}

/// Errors from projectile construction
#[derive(Error, Debug)]
pub enum ProjectileError {
    /// No trajectory samples to travel along
    #[error("trajectory sample set is empty")]
    NoSamples,
}

/// A projectile in flight along trajectory samples
///
/// Holds its own snapshot of the sample points; the index stays within
/// `0..len` for the whole flight. Created when a shot fires and dropped,
/// together with its trajectory, when the cycle resets.
#[derive(Debug, Clone)]
pub struct Projectile {
    samples: Vec<Point3>,
    index: usize,
    prev_step_ms: f64,
    position: Point3,
    step_duration_ms: f64,
}

impl Projectile {
    /// Spawn at the first sample
    ///
    /// `now_ms` seeds the interpolation step timer.
    pub fn new(
        samples: &[Point3],
        config: &ProjectileConfig,
        now_ms: f64,
    ) -> Result<Self, ProjectileError> {
        let first = *samples.first().ok_or(ProjectileError::NoSamples)?;

        Ok(Self {
            samples: samples.to_vec(),
            index: 0,
            prev_step_ms: now_ms,
            position: first,
            step_duration_ms: config.step_duration_ms,
        })
    }

    /// Current rendered position
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Index of the sample the projectile is on (or departing from)
    pub fn index(&self) -> usize {
        self.index
    }

    /// True once the final sample has been reached
    pub fn at_last_sample(&self) -> bool {
        self.index >= self.samples.len() - 1
    }

    /// Jump to the next sample
    ///
    /// Returns false (and does nothing) once the last sample is reached.
    pub fn advance(&mut self) -> bool {
        if self.at_last_sample() {
            return false;
        }

        self.index += 1;
        self.position = self.samples[self.index];
        true
    }

    /// Move smoothly toward the next sample
    ///
    /// While the current step's duration has not elapsed, the position is the
    /// linear interpolation between the current and next sample and the call
    /// returns true ("moved, still mid-step"). Once the duration elapses the
    /// index advances, the step timer resets and the call returns false,
    /// marking the step boundary distinctly from interpolation movement.
    /// At the last sample it always returns false.
    pub fn advance_interpolated(&mut self, now_ms: f64) -> bool {
        if self.at_last_sample() {
            return false;
        }

        let elapsed = now_ms - self.prev_step_ms;

        if elapsed < self.step_duration_ms {
            let t = (elapsed / self.step_duration_ms) as f32;
            let current = self.samples[self.index];
            let next = self.samples[self.index + 1];
            self.position = utils::lerp_point(current, next, t);
            true
        } else {
            self.index += 1;
            self.prev_step_ms = now_ms;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_samples(count: usize) -> Vec<Point3> {
        (0..count)
            .map(|i| Point3::new(i as f32 * 10.0, 0.0, 0.0))
            .collect()
    }

    fn projectile(samples: &[Point3], now_ms: f64) -> Projectile {
        Projectile::new(samples, &ProjectileConfig::default(), now_ms).unwrap()
    }

    #[test]
    fn test_empty_samples_are_rejected() {
        assert!(matches!(
            Projectile::new(&[], &ProjectileConfig::default(), 0.0),
            Err(ProjectileError::NoSamples)
        ));
    }

    #[test]
    fn test_spawns_on_first_sample() {
        let samples = line_samples(5);
        let p = projectile(&samples, 0.0);

        assert_eq!(p.index(), 0);
        assert_relative_eq!(p.position(), samples[0], epsilon = 1e-6);
    }

    #[test]
    fn test_discrete_advance_stops_at_last_index() {
        let samples = line_samples(4);
        let mut p = projectile(&samples, 0.0);

        assert!(p.advance());
        assert!(p.advance());
        assert!(p.advance());
        assert_eq!(p.index(), 3);
        assert!(p.at_last_sample());

        for _ in 0..10 {
            assert!(!p.advance());
            assert_eq!(p.index(), 3);
        }
    }

    #[test]
    fn test_interpolation_is_a_convex_combination() {
        let samples = line_samples(3);
        let mut p = projectile(&samples, 1000.0);

        // mid-step: exactly 40% of the way through the 75 ms step
        assert!(p.advance_interpolated(1030.0));
        assert_eq!(p.index(), 0);
        assert_relative_eq!(p.position(), Point3::new(4.0, 0.0, 0.0), epsilon = 1e-4);

        // position never leaves the segment between the two samples
        assert!(p.position().x >= samples[0].x && p.position().x <= samples[1].x);
    }

    #[test]
    fn test_zero_elapsed_sits_on_current_sample() {
        let samples = line_samples(3);
        let mut p = projectile(&samples, 500.0);

        assert!(p.advance_interpolated(500.0));
        assert_relative_eq!(p.position(), samples[0], epsilon = 1e-6);
    }

    #[test]
    fn test_step_boundary_advances_index_and_returns_false() {
        let samples = line_samples(3);
        let mut p = projectile(&samples, 0.0);

        assert!(!p.advance_interpolated(75.0));
        assert_eq!(p.index(), 1);

        // the fresh step interpolates from the new sample pair
        assert!(p.advance_interpolated(75.0 + 37.5));
        assert_relative_eq!(p.position(), Point3::new(15.0, 0.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_interpolated_advance_exhausts_at_final_sample() {
        let samples = line_samples(3);
        let mut p = projectile(&samples, 0.0);

        let mut now = 0.0;
        while !p.at_last_sample() {
            p.advance_interpolated(now);
            now += 80.0;
        }

        assert_eq!(p.index(), samples.len() - 1);
        assert!(!p.advance_interpolated(now + 1000.0));
    }
}

//! # Dragon Range
//!
//! A shooting-range demo: a robot arm loads and fires projectiles along
//! ballistic spline trajectories at a slowly rotating dragon, with AABB hit
//! detection feeding a shoot/hit/reset state machine.
//!
//! The crate is split the way the behavior decomposes:
//!
//! - [`robot`]: the shoot-cycle finite-state machine and its timers
//! - [`trajectory`]: ballistic control polygon and spline sampling
//! - [`projectile`]: stepwise/interpolated motion along the samples
//! - [`arm`] / [`dragon`]: the two articulated actors
//! - [`scene`]: wiring between per-frame updates and one-shot transition effects
//!
//! Everything is headless and tick-driven; `main` runs a scripted shot cycle
//! through `range_engine`'s frame driver.

pub mod arm;
pub mod config;
pub mod dragon;
pub mod projectile;
pub mod robot;
pub mod scene;
pub mod trajectory;

//! Collision detection
//!
//! Arcade-style hit testing: axis-aligned bounding boxes recomputed per
//! frame from each object's world transform, with a three-axis interval
//! overlap test. No separating-axis or rotated-box handling.

mod aabb;
mod collider;

pub use aabb::Aabb;
pub use collider::{Collider, ColliderError};
